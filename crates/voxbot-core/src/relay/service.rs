//! AI relay service.
//!
//! Wraps the caller's text in the configured instruction template, makes one
//! generator call, and maps an empty answer to the fallback reply.

use tracing::{Instrument, debug, info_span, warn};
use voxbot_types::config::RelayConfig;
use voxbot_types::error::RelayError;

use crate::relay::generator::TextGenerator;

const TEXT_PLACEHOLDER: &str = "{text}";

/// Stateless relay over one [`TextGenerator`].
pub struct RelayService<G: TextGenerator> {
    generator: G,
    prompt_template: String,
    fallback_reply: String,
}

impl<G: TextGenerator> RelayService<G> {
    pub fn new(generator: G, config: &RelayConfig) -> Self {
        Self {
            generator,
            prompt_template: config.prompt_template.clone(),
            fallback_reply: config.fallback_reply.clone(),
        }
    }

    /// Substitute `text` into the template.
    ///
    /// A template without a `{text}` placeholder gets the text appended after
    /// a blank line.
    pub fn build_prompt(&self, text: &str) -> String {
        if self.prompt_template.contains(TEXT_PLACEHOLDER) {
            self.prompt_template.replace(TEXT_PLACEHOLDER, text)
        } else {
            format!("{}\n\n{}", self.prompt_template, text)
        }
    }

    /// Relay `text` to the generator and return the reply.
    pub async fn relay(&self, text: &str) -> Result<String, RelayError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RelayError::InvalidInput("text is required".to_string()));
        }

        let prompt = self.build_prompt(text);
        let span = info_span!(
            "gen_ai.relay",
            gen_ai.system = %self.generator.name(),
            gen_ai.request.model = %self.generator.model(),
            gen_ai.response.model = tracing::field::Empty,
        );

        let generation = self
            .generator
            .generate(&prompt)
            .instrument(span.clone())
            .await
            .inspect_err(|e| warn!(parent: &span, error = %e, "Relay call failed"))?;

        if let Some(model) = generation.model.as_deref() {
            span.record("gen_ai.response.model", model);
        }

        match generation.text.as_deref().map(str::trim) {
            Some(reply) if !reply.is_empty() => {
                debug!(parent: &span, reply_len = reply.len(), "Relay reply received");
                Ok(reply.to_string())
            }
            _ => {
                debug!(parent: &span, "No candidate returned, using fallback reply");
                Ok(self.fallback_reply.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use voxbot_types::config::DEFAULT_FALLBACK_REPLY;
    use voxbot_types::relay::Generation;

    // --- Mock generator ---

    struct MockGenerator {
        outcome: Mutex<Option<Result<Generation, RelayError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn replying(text: Option<&str>) -> Self {
            Self::with(Ok(Generation {
                text: text.map(str::to_string),
                model: Some("mock-model-001".to_string()),
            }))
        }

        fn with(outcome: Result<Generation, RelayError>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl TextGenerator for MockGenerator {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        async fn generate(&self, prompt: &str) -> Result<Generation, RelayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Generation::default()))
        }
    }

    fn relay_with(generator: MockGenerator) -> RelayService<MockGenerator> {
        RelayService::new(generator, &RelayConfig::default())
    }

    #[tokio::test]
    async fn test_relay_returns_trimmed_reply() {
        let svc = relay_with(MockGenerator::replying(Some("  Paris.\n")));
        assert_eq!(svc.relay("What is the capital of France?").await.unwrap(), "Paris.");
    }

    #[tokio::test]
    async fn test_relay_wraps_text_in_template() {
        let svc = relay_with(MockGenerator::replying(Some("ok")));
        svc.relay("Why is the sky blue?").await.unwrap();

        let prompts = svc.generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Answer the following in 2-3 concise sentences."));
        assert!(prompts[0].ends_with("Question: Why is the sky blue?"));
    }

    #[tokio::test]
    async fn test_relay_no_candidate_uses_fallback() {
        for text in [None, Some(""), Some("   ")] {
            let svc = relay_with(MockGenerator::replying(text));
            assert_eq!(svc.relay("hello").await.unwrap(), DEFAULT_FALLBACK_REPLY);
        }
    }

    #[tokio::test]
    async fn test_relay_empty_input_makes_no_call() {
        let svc = relay_with(MockGenerator::replying(Some("unused")));
        let err = svc.relay("  ").await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput(_)));
        assert_eq!(svc.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_relay_propagates_upstream_error() {
        let svc = relay_with(MockGenerator::with(Err(RelayError::Upstream {
            status: Some(503),
            message: "overloaded".to_string(),
        })));
        let err = svc.relay("hello").await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream { status: Some(503), .. }));
    }

    #[test]
    fn test_build_prompt_without_placeholder_appends_text() {
        let config = RelayConfig {
            prompt_template: "Be brief.".to_string(),
            ..Default::default()
        };
        let svc = RelayService::new(MockGenerator::replying(None), &config);
        assert_eq!(svc.build_prompt("Hi"), "Be brief.\n\nHi");
    }

    #[tokio::test]
    async fn test_custom_fallback_reply() {
        let config = RelayConfig {
            fallback_reply: "No idea.".to_string(),
            ..Default::default()
        };
        let svc = RelayService::new(MockGenerator::replying(None), &config);
        assert_eq!(svc.relay("hello").await.unwrap(), "No idea.");
    }
}
