//! Input/output devices a client session depends on.

use voxbot_types::config::VoiceSettings;
use voxbot_types::error::SessionError;

/// Produces one user utterance at a time (microphone, keyboard, ...).
///
/// Not `Send`: terminal readers stay on the task that created them.
pub trait SpeechCapture {
    /// Wait for the next utterance.
    ///
    /// `Ok(None)` means the device closed or nothing was heard.
    fn listen(
        &mut self,
    ) -> impl std::future::Future<Output = Result<Option<String>, SessionError>>;
}

/// Speaks reply text. Fire-and-forget: the session never waits for playback.
pub trait SpeechOutput: Send {
    fn speak(&mut self, text: &str, voice: &VoiceSettings);

    /// Stop any utterance still playing.
    fn cancel(&mut self);
}

/// Asks the user to confirm a destructive action.
pub trait ConfirmPrompt: Send {
    fn confirm(&mut self, prompt: &str) -> bool;
}
