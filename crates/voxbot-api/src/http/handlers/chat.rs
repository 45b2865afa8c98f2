//! Chat history HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/chats/{userId} - List a user's messages, oldest first
//! - POST   /api/chats          - Append one message
//! - DELETE /api/chats/{userId} - Delete a user's history

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use voxbot_types::chat::{AppendChatRequest, ChatMessage, ClearHistoryResponse};

use crate::http::error::AppError;
use crate::http::handlers::rejection;
use crate::state::AppState;

/// GET /api/chats/{userId}
pub async fn list_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = state.chat_service.list_messages(&user_id).await?;
    Ok(Json(messages))
}

/// POST /api/chats - returns 201 with the stored record.
pub async fn append_message(
    State(state): State<AppState>,
    payload: Result<Json<AppendChatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let Json(request) = payload.map_err(rejection)?;
    let stored = state.chat_service.append_message(&request).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE /api/chats/{userId}
pub async fn clear_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ClearHistoryResponse>, AppError> {
    let deleted = state.chat_service.clear_messages(&user_id).await?;
    Ok(Json(ClearHistoryResponse {
        success: true,
        deleted,
    }))
}
