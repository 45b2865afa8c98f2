//! Application error type mapping to HTTP status codes and the JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use voxbot_types::error::{ChatError, ErrorBody, RelayError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Record store errors (validation or persistence).
    Chat(ChatError),
    /// AI relay errors.
    Relay(RelayError),
    /// Request body could not be decoded.
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::Chat(ChatError::Store(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                "Failed to access chat history".to_string(),
                Some(e.to_string()),
            ),
            AppError::Relay(RelayError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::Relay(RelayError::Configuration(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::Relay(e @ RelayError::Upstream { .. }) => (
                StatusCode::BAD_GATEWAY,
                "RELAY_ERROR",
                "Gemini API error".to_string(),
                Some(e.to_string()),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        if status.is_server_error() {
            tracing::error!(
                code,
                error = %message,
                details = details.as_deref().unwrap_or(""),
                "Request failed"
            );
        } else {
            tracing::debug!(code, error = %message, "Request rejected");
        }

        let body = ErrorBody {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
