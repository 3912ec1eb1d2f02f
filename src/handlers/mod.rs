use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::document;
use crate::models::TicketRecord;
use crate::utils::error::AppError;
use crate::utils::response::{failure, message};
use crate::AppState;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "eticket-server",
    };
    (StatusCode::OK, axum::Json(payload)).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTicketRequest {
    pub document_base64: String,
    pub recipient_email: String,
    pub subject: String,
}

/// Relays a rendered ticket document to the passenger's mailbox. The body
/// is parsed by hand so a malformed payload still yields the contractual
/// generic failure response rather than an extractor rejection.
pub async fn send_ticket(State(state): State<AppState>, body: Bytes) -> Response {
    let request: SendTicketRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return AppError::InvalidPayload(format!("malformed request body: {e}"))
                .into_response()
        }
    };

    let document = match BASE64.decode(request.document_base64.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::InvalidPayload(format!("invalid base64 document: {e}"))
                .into_response()
        }
    };

    match state
        .mailer
        .send_ticket(document, &request.recipient_email, &request.subject)
        .await
    {
        Ok(()) => message("Email sent successfully"),
        Err(e) => AppError::Delivery(e).into_response(),
    }
}

/// Renders a ticket to PDF and returns it as a download, named after the
/// booking reference. Durations are refreshed (preserve-if-set) before the
/// document is assembled.
pub async fn render_ticket(body: Bytes) -> Response {
    let mut ticket: TicketRecord = match serde_json::from_slice(&body) {
        Ok(ticket) => ticket,
        Err(e) => {
            tracing::warn!(error = %e, "rejected malformed ticket payload");
            return failure(StatusCode::BAD_REQUEST, "Invalid ticket payload");
        }
    };

    ticket.refresh_durations();
    let pdf = document::render_ticket(&ticket);
    let disposition = format!("attachment; filename=\"{}\"", ticket.document_file_name());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response()
}
