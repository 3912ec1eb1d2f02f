use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `200 { "message": ... }`
pub fn message(text: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: text.into(),
        }),
    )
        .into_response()
}

/// `{ "error": ... }` with the given status.
pub fn failure(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: text.into() })).into_response()
}
