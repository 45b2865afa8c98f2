//! Wire shapes for the AI relay endpoint (`POST /api/chat-ai`).

use serde::{Deserialize, Serialize};

/// Request body: the user's utterance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body: the extracted reply text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub text: String,
}

/// Result of one call to a text generator.
///
/// `text` is `None` when the upstream answered successfully but produced no
/// candidate (or an empty one). The relay maps that case to its fallback reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: Option<String>,
    pub model: Option<String>,
}
