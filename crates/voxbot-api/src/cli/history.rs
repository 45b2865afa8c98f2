//! CLI commands for the stored conversation: `voxbot history` and `voxbot clear`.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use voxbot_core::session::capability::ConfirmPrompt;
use voxbot_core::session::client::ClientSession;
use voxbot_infra::client::HttpChatBackend;
use voxbot_types::chat::{ChatMessage, Sender};
use voxbot_types::error::SessionError;

use crate::cli::ClientContext;
use crate::cli::speech::{DialoguerConfirm, Preapproved, TerminalSpeaker};

/// Print the stored conversation, oldest first.
pub async fn show_history(ctx: ClientContext, json: bool) -> Result<()> {
    let mut session = ClientSession::new(ctx.user_id, ctx.backend, TerminalSpeaker::new(true));
    if let Err(e) = session.load().await {
        anyhow::bail!("{} ({e})", session.error().unwrap_or("Could not load history."));
    }

    let messages: Vec<ChatMessage> = session
        .messages()
        .iter()
        .filter_map(|m| m.as_persisted().cloned())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages yet. Start talking with: {}",
            style("i").blue().bold(),
            style("voxbot chat").yellow()
        );
        println!();
        return Ok(());
    }

    print_messages(&messages);
    Ok(())
}

/// Print messages as a transcript with local timestamps.
pub fn print_messages(messages: &[ChatMessage]) {
    println!();
    for message in messages {
        let label = match message.sender {
            Sender::User => style("You").green().bold(),
            Sender::Bot => style("Bot").cyan().bold(),
        };
        println!(
            "  {} {} {}",
            style(format_timestamp(&message.created_at)).dim(),
            label,
            message.text
        );
    }
    println!();
    println!(
        "  {} message{}",
        style(messages.len()).bold(),
        if messages.len() == 1 { "" } else { "s" }
    );
    println!();
}

/// Delete the stored conversation after confirmation.
pub async fn clear_history(ctx: ClientContext, force: bool, json: bool) -> Result<()> {
    let mut session = ClientSession::new(ctx.user_id, ctx.backend, TerminalSpeaker::new(true));

    let spinner = ProgressBar::new_spinner();
    let result = if force || json {
        run_clear(&mut session, &mut Preapproved(true), &spinner).await
    } else {
        run_clear(&mut session, &mut DialoguerConfirm, &spinner).await
    };
    spinner.finish_and_clear();

    let cleared = match result {
        Ok(cleared) => cleared,
        Err(e) => anyhow::bail!(
            "{} ({e})",
            session.error().unwrap_or("Failed to delete history.")
        ),
    };

    if json {
        println!("{}", serde_json::json!({ "success": cleared }));
    } else if cleared {
        println!("  {} History deleted.", style("✓").red().bold());
    } else {
        println!("  Cancelled.");
    }

    Ok(())
}

async fn run_clear<P: ConfirmPrompt>(
    session: &mut ClientSession<HttpChatBackend, TerminalSpeaker>,
    prompt: &mut P,
    spinner: &ProgressBar,
) -> Result<bool, SessionError> {
    let mut prompt = SpinAfterConfirm { inner: prompt, spinner };
    session.clear_history(&mut prompt).await
}

/// Starts the spinner once the user has said yes.
struct SpinAfterConfirm<'a, P> {
    inner: &'a mut P,
    spinner: &'a ProgressBar,
}

impl<P: ConfirmPrompt> ConfirmPrompt for SpinAfterConfirm<'_, P> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let confirmed = self.inner.confirm(prompt);
        if confirmed {
            if let Ok(template) =
                ProgressStyle::default_spinner().template("{spinner:.red} {msg}")
            {
                self.spinner.set_style(template);
            }
            self.spinner.set_message("Deleting history...");
            self.spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        }
        confirmed
    }
}

fn format_timestamp(dt: &DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    if local.date_naive() == Local::now().date_naive() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}
