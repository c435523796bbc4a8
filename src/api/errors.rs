use std::any::Any;

use axum::extract::rejection::BytesRejection;
use axum::response::Response;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;
use crate::errors::VoiceError;
use crate::utils::truncate_for_response;

impl IntoResponse for VoiceError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            VoiceError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            VoiceError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, json!({"error": "Payload too large", "details": msg}))
            }
            VoiceError::NotConfigured(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": msg})),
            VoiceError::Gateway { error, details } => {
                (StatusCode::BAD_GATEWAY, json!({"error": error, "details": details}))
            }
            VoiceError::Service { error, details } => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": error, "details": details}))
            }
            VoiceError::Network(_) | VoiceError::Timeout(_) | VoiceError::Upstream { .. } => (
                StatusCode::BAD_GATEWAY,
                json!({"error": "Upstream request failed", "details": truncate_for_response(&self.detail())}),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error", "details": self.to_string()}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<BytesRejection> for VoiceError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            VoiceError::PayloadTooLarge(rejection.body_text())
        } else {
            VoiceError::InvalidRequest(rejection.body_text())
        }
    }
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(details = %details, "Request handler panicked");
    VoiceError::Internal(details).into_response()
}
