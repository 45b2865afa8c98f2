//! ChatBackend trait: the chat server as seen from a client session.
//!
//! Implementations live in voxbot-infra (e.g., `HttpChatBackend`).

use voxbot_types::chat::{AppendChatRequest, ChatMessage, ChatStats};
use voxbot_types::error::SessionError;

pub trait ChatBackend: Send + Sync {
    /// `GET /api/chats/{userId}`
    fn list(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, SessionError>> + Send;

    /// `POST /api/chats`
    fn append(
        &self,
        request: &AppendChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatMessage, SessionError>> + Send;

    /// `DELETE /api/chats/{userId}`; returns the number of removed messages.
    fn clear(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, SessionError>> + Send;

    /// `POST /api/chat-ai`
    fn relay(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String, SessionError>> + Send;

    /// `GET /api/chats/{userId}/stats`
    fn stats(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<ChatStats, SessionError>> + Send;
}
