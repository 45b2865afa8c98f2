//! HTTP request handlers for the REST API.

pub mod chat;
pub mod relay;
pub mod stats;

use axum::extract::rejection::JsonRejection;

use crate::http::error::AppError;

/// Malformed or missing JSON bodies are validation failures.
pub(crate) fn rejection(err: JsonRejection) -> AppError {
    AppError::Validation(err.body_text())
}
