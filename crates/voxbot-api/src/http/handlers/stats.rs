//! Dashboard statistics endpoint.
//!
//! GET /api/chats/{userId}/stats - Counts by sender and by UTC hour.

use axum::Json;
use axum::extract::{Path, State};

use voxbot_types::chat::ChatStats;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ChatStats>, AppError> {
    let stats = state.chat_service.message_stats(&user_id).await?;
    Ok(Json(stats))
}
