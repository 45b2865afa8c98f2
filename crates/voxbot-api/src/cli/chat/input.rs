//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` and exposes it as the session's
//! [`SpeechCapture`]: a typed line is one utterance.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use voxbot_core::session::capability::SpeechCapture;
use voxbot_types::error::SessionError;

use super::commands::{self, ChatCommand};
use crate::cli::speech::ThinkingIndicator;

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new chat input handler with the given prompt.
    ///
    /// Returns the input handler and a `SharedWriter` that can be used to
    /// print output without interfering with the readline prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Read a line of input.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.rl.add_history_entry(trimmed.clone());
                }
                InputEvent::Message(trimmed)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exiting.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

impl SpeechCapture for ChatInput {
    /// Ctrl+C abandons the current line and keeps listening; Ctrl+D closes.
    async fn listen(&mut self) -> Result<Option<String>, SessionError> {
        loop {
            match self.read_line().await {
                InputEvent::Message(text) => return Ok(Some(text)),
                InputEvent::Eof => return Ok(None),
                InputEvent::Interrupted => {
                    println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                }
            }
        }
    }
}

/// What a [`CommandFilter`] saw besides an utterance.
#[derive(Debug, Default, PartialEq)]
pub enum Held {
    #[default]
    Nothing,
    /// A slash command, kept back from the session.
    Command(ChatCommand),
    /// The input closed (Ctrl+D).
    Closed,
}

/// Capture that passes utterances to the session and holds slash commands
/// back for the chat loop. Starts the thinking spinner once an utterance is
/// handed over.
pub struct CommandFilter<'a, C> {
    inner: &'a mut C,
    thinking: ThinkingIndicator,
    held: Held,
}

impl<'a, C: SpeechCapture> CommandFilter<'a, C> {
    pub fn new(inner: &'a mut C, thinking: ThinkingIndicator) -> Self {
        Self {
            inner,
            thinking,
            held: Held::Nothing,
        }
    }

    pub fn into_held(self) -> Held {
        self.held
    }
}

impl<C: SpeechCapture> SpeechCapture for CommandFilter<'_, C> {
    async fn listen(&mut self) -> Result<Option<String>, SessionError> {
        let Some(text) = self.inner.listen().await? else {
            self.held = Held::Closed;
            return Ok(None);
        };

        if let Some(cmd) = commands::parse(&text) {
            self.held = Held::Command(cmd);
            return Ok(None);
        }

        if !text.trim().is_empty() {
            self.thinking.start();
        }
        Ok(Some(text))
    }
}
