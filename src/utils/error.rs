use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::mailer::MailError;
use crate::utils::response::failure;

/// Public text for every gateway failure. The caller only learns that the
/// send failed; the specific cause goes to the log.
pub const GENERIC_FAILURE: &str = "Failed to send email";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        // Every failure kind maps to the single generic server-error
        // response; there are no partial-failure states.
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal details, expose only the generic message.
        error!(error = %self, "send-ticket request failed");
        failure(self.status_code(), GENERIC_FAILURE)
    }
}
