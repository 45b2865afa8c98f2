//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `voxbot-core` using sqlx with split read/write pools:
//! raw queries, a private Row struct, reads on the reader pool and writes on the
//! single-connection writer pool.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::Row;
use uuid::Uuid;
use voxbot_core::chat::repository::ChatRepository;
use voxbot_types::chat::{ChatMessage, NewChatMessage, Sender};
use voxbot_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatMessageRow {
    id: String,
    user_id: String,
    text: String,
    sender: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            text: row.try_get("text")?,
            sender: row.try_get("sender")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            user_id: self.user_id,
            text: self.text,
            sender,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width UTC form so that text ordering matches time ordering.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn list_messages(&self, user_id: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, user_id, text, sender, created_at FROM chat_messages WHERE user_id = ? ORDER BY created_at ASC, seq ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                ChatMessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn append_message(
        &self,
        message: &NewChatMessage,
        requested_at: DateTime<Utc>,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let latest: Option<String> =
            sqlx::query_scalar("SELECT MAX(created_at) FROM chat_messages WHERE user_id = ?")
                .bind(&message.user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Stored precision is microseconds; compare at that precision too.
        let mut created_at = requested_at.trunc_subsecs(6);
        if let Some(latest) = latest.as_deref().map(parse_datetime).transpose()? {
            created_at = created_at.max(latest);
        }

        let stored = ChatMessage {
            id: Uuid::now_v7(),
            user_id: message.user_id.clone(),
            text: message.text.clone(),
            sender: message.sender,
            created_at,
        };

        sqlx::query(
            r#"INSERT INTO chat_messages (id, user_id, text, sender, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(stored.id.to_string())
        .bind(&stored.user_id)
        .bind(&stored.text)
        .bind(stored.sender.to_string())
        .bind(format_datetime(&stored.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(stored)
    }

    async fn clear_messages(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
