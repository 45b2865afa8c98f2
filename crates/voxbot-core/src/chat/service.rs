//! Chat service over the record store.
//!
//! ChatService is the only entry point the HTTP layer uses for chat records:
//! it validates append requests, stamps insert times, and wraps repository
//! failures as [`ChatError::Store`].

use chrono::Utc;
use tracing::{debug, info};
use voxbot_types::chat::{AppendChatRequest, ChatMessage, ChatStats};
use voxbot_types::error::ChatError;

use crate::chat::repository::ChatRepository;
use crate::chat::stats::compute_stats;

/// List/append/clear operations over one [`ChatRepository`].
///
/// Generic over the repository to keep voxbot-core free of infra dependencies.
/// Stateless beyond the repository handle: every call is independent.
pub struct ChatService<R: ChatRepository> {
    repo: R,
}

impl<R: ChatRepository> ChatService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All messages for `user_id`, oldest first. Empty for unknown ids.
    pub async fn list_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, ChatError> {
        let messages = self.repo.list_messages(user_id).await?;
        debug!(user_id, count = messages.len(), "Listed chat messages");
        Ok(messages)
    }

    /// Validate and store one message.
    ///
    /// Nothing is written when validation fails.
    pub async fn append_message(
        &self,
        request: &AppendChatRequest,
    ) -> Result<ChatMessage, ChatError> {
        let new_message = request.validate()?;
        let stored = self.repo.append_message(&new_message, Utc::now()).await?;
        info!(
            user_id = %stored.user_id,
            message_id = %stored.id,
            sender = %stored.sender,
            "Chat message appended"
        );
        Ok(stored)
    }

    /// Remove every message for `user_id`. Idempotent.
    pub async fn clear_messages(&self, user_id: &str) -> Result<u64, ChatError> {
        let removed = self.repo.clear_messages(user_id).await?;
        info!(user_id, removed, "Chat history cleared");
        Ok(removed)
    }

    /// Dashboard counts for `user_id`.
    pub async fn message_stats(&self, user_id: &str) -> Result<ChatStats, ChatError> {
        let messages = self.repo.list_messages(user_id).await?;
        Ok(compute_stats(&messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;
    use voxbot_types::chat::{NewChatMessage, Sender};
    use voxbot_types::error::RepositoryError;

    // --- Mock repositories ---

    #[derive(Default)]
    struct MemoryRepo {
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl ChatRepository for MemoryRepo {
        async fn list_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
            let messages = self.messages.lock().unwrap();
            Ok(messages.iter().filter(|m| m.user_id == user_id).cloned().collect())
        }

        async fn append_message(
            &self,
            message: &NewChatMessage,
            requested_at: DateTime<Utc>,
        ) -> Result<ChatMessage, RepositoryError> {
            let mut messages = self.messages.lock().unwrap();
            let latest = messages
                .iter()
                .filter(|m| m.user_id == message.user_id)
                .map(|m| m.created_at)
                .max();
            let stored = ChatMessage {
                id: Uuid::now_v7(),
                user_id: message.user_id.clone(),
                text: message.text.clone(),
                sender: message.sender,
                created_at: latest.map_or(requested_at, |l| l.max(requested_at)),
            };
            messages.push(stored.clone());
            Ok(stored)
        }

        async fn clear_messages(&self, user_id: &str) -> Result<u64, RepositoryError> {
            let mut messages = self.messages.lock().unwrap();
            let before = messages.len();
            messages.retain(|m| m.user_id != user_id);
            Ok((before - messages.len()) as u64)
        }
    }

    struct BrokenRepo;

    impl ChatRepository for BrokenRepo {
        async fn list_messages(&self, _: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
            Err(RepositoryError::Connection("store offline".to_string()))
        }

        async fn append_message(
            &self,
            _: &NewChatMessage,
            _: DateTime<Utc>,
        ) -> Result<ChatMessage, RepositoryError> {
            Err(RepositoryError::Connection("store offline".to_string()))
        }

        async fn clear_messages(&self, _: &str) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Connection("store offline".to_string()))
        }
    }

    fn service() -> ChatService<MemoryRepo> {
        ChatService::new(MemoryRepo::default())
    }

    #[tokio::test]
    async fn test_list_unknown_user_is_empty() {
        let svc = service();
        let messages = svc.list_messages("nobody").await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_list_orders_by_created_at() {
        let svc = service();
        let mut last = None;
        for (text, sender) in [
            ("Hi", Sender::User),
            ("Hello!", Sender::Bot),
            ("Bye", Sender::User),
        ] {
            let stored = svc
                .append_message(&AppendChatRequest::new("u1", text, sender))
                .await
                .unwrap();
            if let Some(prev) = last {
                assert!(stored.created_at >= prev);
            }
            last = Some(stored.created_at);
        }

        let messages = svc.list_messages("u1").await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Hi", "Hello!", "Bye"]);
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_append_invalid_request_writes_nothing() {
        let svc = service();
        let empty_text = AppendChatRequest {
            user_id: Some("u1".to_string()),
            text: Some(String::new()),
            sender: Some("user".to_string()),
        };
        let no_sender = AppendChatRequest {
            user_id: Some("u1".to_string()),
            text: Some("Hi".to_string()),
            sender: None,
        };

        for request in [empty_text, no_sender] {
            let err = svc.append_message(&request).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
        assert!(svc.list_messages("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let svc = service();
        svc.append_message(&AppendChatRequest::new("u1", "Hi", Sender::User))
            .await
            .unwrap();
        svc.append_message(&AppendChatRequest::new("u2", "Other", Sender::User))
            .await
            .unwrap();

        assert_eq!(svc.clear_messages("u1").await.unwrap(), 1);
        assert_eq!(svc.clear_messages("u1").await.unwrap(), 0);
        assert!(svc.list_messages("u1").await.unwrap().is_empty());
        // Other partitions are untouched.
        assert_eq!(svc.list_messages("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_message_stats() {
        let svc = service();
        svc.append_message(&AppendChatRequest::new("u1", "Hi", Sender::User))
            .await
            .unwrap();
        svc.append_message(&AppendChatRequest::new("u1", "Hello!", Sender::Bot))
            .await
            .unwrap();

        let stats = svc.message_stats("u1").await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.user_count, 1);
        assert_eq!(stats.bot_count, 1);
    }

    #[tokio::test]
    async fn test_store_failures_surface_as_store_errors() {
        let svc = ChatService::new(BrokenRepo);
        assert!(matches!(svc.list_messages("u1").await, Err(ChatError::Store(_))));
        assert!(matches!(svc.clear_messages("u1").await, Err(ChatError::Store(_))));
        assert!(matches!(
            svc.append_message(&AppendChatRequest::new("u1", "Hi", Sender::User)).await,
            Err(ChatError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_validation_checked_before_store() {
        // A broken store must not turn a bad request into a store error.
        let svc = ChatService::new(BrokenRepo);
        let err = svc
            .append_message(&AppendChatRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }
}
