//! AI relay HTTP handler.
//!
//! POST /api/chat-ai - `{text}` in, `{text}` out.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use voxbot_types::relay::{RelayReply, RelayRequest};

use crate::http::error::AppError;
use crate::http::handlers::rejection;
use crate::state::AppState;

pub async fn relay(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Json<RelayReply>, AppError> {
    let Json(request) = payload.map_err(rejection)?;
    let text = request.text.unwrap_or_default();
    let reply = state.relay_service.relay(&text).await?;
    Ok(Json(RelayReply { text: reply }))
}
