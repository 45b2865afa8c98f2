//! ChatRepository trait definition.
//!
//! Provides the append-only record store operations for chat messages.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use chrono::{DateTime, Utc};
use voxbot_types::chat::{ChatMessage, NewChatMessage};
use voxbot_types::error::RepositoryError;

/// Repository trait for chat message persistence.
///
/// Implementations live in voxbot-infra (e.g., `SqliteChatRepository`).
/// Each `user_id` is an independent partition; there are no cross-partition
/// operations other than counting.
pub trait ChatRepository: Send + Sync {
    /// All messages for a user, ordered by `created_at` ASC (insert order on ties).
    ///
    /// Unknown ids yield an empty vector, never an error.
    fn list_messages(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Insert a validated message and return the stored record.
    ///
    /// `requested_at` is the caller's clock reading. Implementations assign the
    /// id and store `max(requested_at, latest created_at in the partition)` so
    /// that `created_at` never decreases within a user's history.
    fn append_message(
        &self,
        message: &NewChatMessage,
        requested_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Delete every message for a user. Returns the number removed.
    fn clear_messages(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
