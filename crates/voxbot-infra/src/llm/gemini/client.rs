//! GeminiProvider -- concrete [`TextGenerator`] implementation for Google Gemini.
//!
//! Sends one `generateContent` request per call. The API key is wrapped in
//! [`secrecy::SecretString`] and only exposed when building the request URL
//! query string; it never appears in `Debug` output or tracing logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use voxbot_core::relay::generator::TextGenerator;
use voxbot_types::config::RelayConfig;
use voxbot_types::error::RelayError;
use voxbot_types::relay::Generation;

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Env var name reported when the credential is missing.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Google Gemini text generator.
///
/// The key is optional at construction so that a server can start without
/// one; every `generate` call then fails with [`RelayError::Configuration`]
/// before touching the network.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit key, model and request timeout.
    pub fn new(
        api_key: Option<SecretString>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
        })
    }

    /// Build a provider from relay settings.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let api_key = config.api_key().map(|key| SecretString::from(key.to_string()));
        Ok(Self::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?
        .with_base_url(config.base_url.clone()))
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Prefer Gemini's own error message over the raw body.
fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

// GeminiProvider does not derive Debug; see the module docs.

impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, RelayError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| RelayError::Configuration(format!("{API_KEY_ENV} missing")))?;

        let response = self
            .client
            .post(self.url())
            .query(&[("key", api_key.expose_secret())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| RelayError::Upstream {
                status: None,
                message: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    // without_url keeps the key out of the message
                    format!("HTTP request failed: {}", e.without_url())
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream {
                status: Some(status.as_u16()),
                message: upstream_message(&body),
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| RelayError::Upstream {
                status: Some(status.as_u16()),
                message: format!("failed to parse response: {}", e.without_url()),
            })?;

        debug!(
            candidates = parsed.candidates.len(),
            finish_reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none"),
            model_version = parsed.model_version.as_deref().unwrap_or("unknown"),
            "Gemini response received"
        );

        Ok(Generation {
            text: parsed.first_text().map(str::to_string),
            model: parsed.model_version,
        })
    }
}
