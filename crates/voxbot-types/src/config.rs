//! Configuration types for Voxbot.
//!
//! `ServerConfig` represents `config.toml` in the data directory, merged with
//! environment overrides by the loader in `voxbot-infra`. All fields have
//! defaults so an empty file (or no file) yields a runnable server, minus
//! the relay credential.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default instruction wrapper around the user's text.
pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Answer the following in 2-3 concise sentences. Do NOT give long explanations.\n\nQuestion: {text}";

/// Reply used when the generator returns no candidate.
pub const DEFAULT_FALLBACK_REPLY: &str = "Sorry, I couldn't understand.";

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite connection string. `None` means `<data_dir>/voxbot.db`.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Origins allowed to call the API. Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub relay: RelayConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            cors_allowed_origins: Vec::new(),
            relay: RelayConfig::default(),
        }
    }
}

/// Settings for the AI relay and its upstream generator.
#[derive(Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Generator API key. Usually supplied through `GEMINI_API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Instruction wrapper; `{text}` is replaced by the user's input.
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl RelayConfig {
    /// The credential, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            prompt_template: default_prompt_template(),
            fallback_reply: default_fallback_reply(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Hand-written so the API key never reaches logs.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("prompt_template", &self.prompt_template)
            .field("fallback_reply", &self.fallback_reply)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Speech output settings (rate, pitch, volume).
///
/// Rate and pitch are clamped to `[0.5, 2.0]`, volume to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl VoiceSettings {
    pub const MIN_RATE: f32 = 0.5;
    pub const MAX_RATE: f32 = 2.0;

    pub fn new(rate: f32, pitch: f32, volume: f32) -> Self {
        Self {
            rate: clamp_or(rate, Self::MIN_RATE, Self::MAX_RATE),
            pitch: clamp_or(pitch, Self::MIN_RATE, Self::MAX_RATE),
            volume: clamp_or(volume, 0.0, 1.0),
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// NaN falls back to 1.0 before clamping.
fn clamp_or(value: f32, min: f32, max: f32) -> f32 {
    let value = if value.is_nan() { 1.0 } else { value };
    value.clamp(min, max)
}
