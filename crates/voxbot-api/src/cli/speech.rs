//! Terminal stand-ins for the session's speech and confirmation capabilities.
//!
//! Replies are "spoken" by printing them; the thinking spinner lives here so
//! that the first spoken word clears it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use voxbot_core::session::capability::{ConfirmPrompt, SpeechOutput};
use voxbot_types::config::VoiceSettings;

/// The "thinking..." spinner, shared between whoever starts it (the capture
/// side, once an utterance is accepted) and the speaker that clears it.
#[derive(Clone)]
pub struct ThinkingIndicator {
    quiet: bool,
    spinner: Arc<Mutex<Option<ProgressBar>>>,
}

impl ThinkingIndicator {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            spinner: Arc::new(Mutex::new(None)),
        }
    }

    /// Show the spinner until [`stop`](Self::stop). No-op when quiet.
    pub fn start(&self) {
        self.stop();
        if self.quiet {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    pub fn stop(&self) {
        let spinner = self.spinner.lock().ok().and_then(|mut slot| slot.take());
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn is_active(&self) -> bool {
        self.spinner.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

/// Prints replies to stdout; printing clears the thinking spinner.
pub struct TerminalSpeaker {
    thinking: ThinkingIndicator,
}

impl TerminalSpeaker {
    pub fn new(quiet: bool) -> Self {
        Self {
            thinking: ThinkingIndicator::new(quiet),
        }
    }

    /// A handle on this speaker's spinner.
    pub fn thinking(&self) -> ThinkingIndicator {
        self.thinking.clone()
    }
}

impl SpeechOutput for TerminalSpeaker {
    fn speak(&mut self, text: &str, voice: &VoiceSettings) {
        self.thinking.stop();
        debug!(
            rate = voice.rate,
            pitch = voice.pitch,
            volume = voice.volume,
            chars = text.len(),
            "Speaking reply"
        );
        println!("  {} {}", style("Bot >").cyan().bold(), text);
    }

    fn cancel(&mut self) {
        self.thinking.stop();
    }
}

/// Asks on the terminal, defaulting to "no".
pub struct DialoguerConfirm;

impl ConfirmPrompt for DialoguerConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Answers without asking: `--force`, `--json`, or an explicit `/forget yes`.
pub struct Preapproved(pub bool);

impl ConfirmPrompt for Preapproved {
    fn confirm(&mut self, prompt: &str) -> bool {
        debug!(prompt, answer = self.0, "Confirmation answered in advance");
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_indicator_never_spins() {
        let thinking = ThinkingIndicator::new(true);
        thinking.start();
        assert!(!thinking.is_active());
    }

    #[test]
    fn test_speak_clears_shared_spinner() {
        let mut speaker = TerminalSpeaker::new(false);
        let thinking = speaker.thinking();
        thinking.start();
        assert!(speaker.thinking.is_active());

        speaker.speak("Hello!", &VoiceSettings::default());
        assert!(!thinking.is_active());
    }

    #[test]
    fn test_cancel_stops_spinner() {
        let mut speaker = TerminalSpeaker::new(false);
        speaker.thinking().start();
        speaker.cancel();
        assert!(!speaker.thinking.is_active());
    }

    #[test]
    fn test_preapproved() {
        assert!(Preapproved(true).confirm("Delete?"));
        assert!(!Preapproved(false).confirm("Delete?"));
    }
}
