//! TextGenerator trait definition.
//!
//! The single seam between the relay and an external generative-language API.
//! Implementations live in voxbot-infra (e.g., `GeminiProvider`).

use voxbot_types::error::RelayError;
use voxbot_types::relay::Generation;

/// A backend that turns one prompt into (at most) one reply.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait TextGenerator: Send + Sync {
    /// Provider name recorded on relay spans (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;

    /// Send one prompt and return the first candidate, if any.
    ///
    /// A successful call with no usable candidate returns
    /// `Generation { text: None, .. }`, not an error.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<Generation, RelayError>> + Send;
}
