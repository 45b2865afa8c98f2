//! ClientSession: the capture → relay → speak → persist → resync loop.

use tracing::{debug, info, warn};
use voxbot_types::chat::{AppendChatRequest, ChatMessage, ChatStats, Sender};
use voxbot_types::config::VoiceSettings;
use voxbot_types::error::SessionError;

use crate::session::backend::ChatBackend;
use crate::session::capability::{ConfirmPrompt, SpeechCapture, SpeechOutput};

/// Banner shown when the history cannot be fetched.
pub const LOAD_ERROR: &str = "Could not connect to the chat server.";

/// Spoken in place of a reply when an exchange fails.
pub const APOLOGY: &str = "I encountered a connection error.";

/// Banner shown when clearing the history fails.
pub const CLEAR_ERROR: &str = "Failed to delete history.";

/// Question asked before clearing the history.
pub const CLEAR_PROMPT: &str = "Delete all chat history? This cannot be undone.";

/// A message as held in session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    /// Shown optimistically, not yet confirmed by the server.
    Provisional { text: String, sender: Sender },
    /// Read back from the record store.
    Persisted(ChatMessage),
}

impl SessionMessage {
    pub fn text(&self) -> &str {
        match self {
            SessionMessage::Provisional { text, .. } => text,
            SessionMessage::Persisted(message) => &message.text,
        }
    }

    pub fn sender(&self) -> Sender {
        match self {
            SessionMessage::Provisional { sender, .. } => *sender,
            SessionMessage::Persisted(message) => message.sender,
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, SessionMessage::Provisional { .. })
    }

    /// The stored record, if this message has been read back from the server.
    pub fn as_persisted(&self) -> Option<&ChatMessage> {
        match self {
            SessionMessage::Persisted(message) => Some(message),
            SessionMessage::Provisional { .. } => None,
        }
    }
}

/// What happened to one submitted utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or another exchange is still in flight.
    Ignored,
    /// The reply that was spoken and stored.
    Replied(String),
    /// The exchange failed; carries the banner text.
    Failed(String),
}

/// View state for one user's conversation.
pub struct ClientSession<B: ChatBackend, O: SpeechOutput> {
    user_id: String,
    backend: B,
    output: O,
    voice: VoiceSettings,
    messages: Vec<SessionMessage>,
    is_processing: bool,
    error: Option<String>,
}

impl<B: ChatBackend, O: SpeechOutput> ClientSession<B, O> {
    pub fn new(user_id: impl Into<String>, backend: B, output: O) -> Self {
        Self {
            user_id: user_id.into(),
            backend,
            output,
            voice: VoiceSettings::default(),
            messages: Vec::new(),
            is_processing: false,
            error: None,
        }
    }

    pub fn with_voice(mut self, voice: VoiceSettings) -> Self {
        self.voice = voice;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn messages(&self) -> &[SessionMessage] {
        &self.messages
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Current error banner, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn voice(&self) -> &VoiceSettings {
        &self.voice
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Replace local messages with the stored history.
    pub async fn load(&mut self) -> Result<(), SessionError> {
        match self.backend.list(&self.user_id).await {
            Ok(history) => {
                debug!(user_id = %self.user_id, count = history.len(), "History loaded");
                self.messages = history.into_iter().map(SessionMessage::Persisted).collect();
                Ok(())
            }
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "Failed to load history");
                self.error = Some(LOAD_ERROR.to_string());
                Err(e)
            }
        }
    }

    /// Run one exchange for `text`.
    ///
    /// The user message is shown immediately as provisional. After the reply
    /// is spoken and both sides are stored, local state is resynced from the
    /// server. Failures are not retried.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() || self.is_processing {
            return SubmitOutcome::Ignored;
        }

        self.is_processing = true;
        self.error = None;
        self.messages.push(SessionMessage::Provisional {
            text: text.to_string(),
            sender: Sender::User,
        });

        let outcome = match self.exchange(text).await {
            Ok(reply) => {
                // A failed resync sets its own banner; the exchange itself succeeded.
                let _ = self.load().await;
                SubmitOutcome::Replied(reply)
            }
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "Exchange failed");
                let description = e.to_string();
                self.error = Some(description.clone());
                self.output.speak(APOLOGY, &self.voice);
                SubmitOutcome::Failed(description)
            }
        };

        self.is_processing = false;
        outcome
    }

    async fn exchange(&mut self, text: &str) -> Result<String, SessionError> {
        let reply = self.backend.relay(text).await?;
        self.output.speak(&reply, &self.voice);

        self.backend
            .append(&AppendChatRequest::new(&self.user_id, text, Sender::User))
            .await?;
        self.backend
            .append(&AppendChatRequest::new(&self.user_id, &reply, Sender::Bot))
            .await?;

        Ok(reply)
    }

    /// Silence any playing reply, capture one utterance and submit it.
    pub async fn capture_and_submit<C: SpeechCapture>(
        &mut self,
        capture: &mut C,
    ) -> Result<SubmitOutcome, SessionError> {
        self.output.cancel();
        match capture.listen().await? {
            Some(text) if !text.trim().is_empty() => Ok(self.submit(&text).await),
            _ => Ok(SubmitOutcome::Ignored),
        }
    }

    /// Delete the stored history after confirmation.
    ///
    /// Returns `Ok(false)` when the user declines; no request is made then.
    pub async fn clear_history<P: ConfirmPrompt>(
        &mut self,
        prompt: &mut P,
    ) -> Result<bool, SessionError> {
        if !prompt.confirm(CLEAR_PROMPT) {
            debug!(user_id = %self.user_id, "Clear declined");
            return Ok(false);
        }

        match self.backend.clear(&self.user_id).await {
            Ok(removed) => {
                info!(user_id = %self.user_id, removed, "History cleared");
                self.messages.clear();
                Ok(true)
            }
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "Failed to clear history");
                self.error = Some(CLEAR_ERROR.to_string());
                Err(e)
            }
        }
    }

    /// Dashboard statistics for this session's user.
    pub async fn stats(&self) -> Result<ChatStats, SessionError> {
        self.backend.stats(&self.user_id).await
    }
}
