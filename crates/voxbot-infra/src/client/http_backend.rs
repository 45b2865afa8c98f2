//! HttpChatBackend -- [`ChatBackend`] over the chat server's JSON API.

use std::time::Duration;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use voxbot_core::session::backend::ChatBackend;
use voxbot_types::chat::{AppendChatRequest, ChatMessage, ChatStats, ClearHistoryResponse};
use voxbot_types::error::{ErrorBody, SessionError};
use voxbot_types::relay::{RelayReply, RelayRequest};

/// Default server address used by the terminal client.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Talks to `/api/chats` and `/api/chat-ai` on one server.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChatBackend {
    /// Create a backend for `base_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// `timeout` bounds every request, including the relay call.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SessionError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SessionError::Transport(format!("invalid server url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SessionError::Transport(format!(
                "invalid server url '{base_url}'"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }
}

fn transport(e: reqwest::Error) -> SessionError {
    if e.is_timeout() {
        SessionError::Transport("request timed out".to_string())
    } else {
        SessionError::Transport(e.to_string())
    }
}

/// Decode a success body, or turn an error status into [`SessionError::Server`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SessionError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => (err.code, err.error),
            Err(_) => (String::new(), format!("HTTP {status}")),
        };
        return Err(SessionError::Server {
            status: status.as_u16(),
            code,
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SessionError::Decode(e.to_string()))
}

impl ChatBackend for HttpChatBackend {
    async fn list(&self, user_id: &str) -> Result<Vec<ChatMessage>, SessionError> {
        let response = self
            .client
            .get(self.endpoint(&["chats", user_id]))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn append(&self, request: &AppendChatRequest) -> Result<ChatMessage, SessionError> {
        let response = self
            .client
            .post(self.endpoint(&["chats"]))
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn clear(&self, user_id: &str) -> Result<u64, SessionError> {
        let response = self
            .client
            .delete(self.endpoint(&["chats", user_id]))
            .send()
            .await
            .map_err(transport)?;
        let body: ClearHistoryResponse = decode(response).await?;
        debug!(user_id, deleted = body.deleted, "Clear acknowledged");
        Ok(body.deleted)
    }

    async fn relay(&self, text: &str) -> Result<String, SessionError> {
        let response = self
            .client
            .post(self.endpoint(&["chat-ai"]))
            .json(&RelayRequest {
                text: Some(text.to_string()),
            })
            .send()
            .await
            .map_err(transport)?;
        let reply: RelayReply = decode(response).await?;
        Ok(reply.text)
    }

    async fn stats(&self, user_id: &str) -> Result<ChatStats, SessionError> {
        let response = self
            .client
            .get(self.endpoint(&["chats", user_id, "stats"]))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}
