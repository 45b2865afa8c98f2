//! Main chat loop orchestration.
//!
//! Loads the stored conversation, prints the banner, then lets the
//! [`ClientSession`] capture and submit one line at a time. Slash commands are
//! held back by [`CommandFilter`] and run here.

use console::style;
use tracing::{info, warn};

use voxbot_core::session::client::{ClientSession, SubmitOutcome};
use voxbot_infra::client::HttpChatBackend;
use voxbot_types::config::VoiceSettings;

use crate::cli::ClientContext;
use crate::cli::history::print_messages;
use crate::cli::speech::{Preapproved, TerminalSpeaker};
use crate::cli::stats::print_stats;

use super::banner::{print_error_banner, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, CommandFilter, Held};

type TerminalSession = ClientSession<HttpChatBackend, TerminalSpeaker>;

/// Run the interactive chat loop against the configured server.
pub async fn run_chat_loop(
    ctx: ClientContext,
    voice: VoiceSettings,
    quiet: bool,
) -> anyhow::Result<()> {
    let server = ctx.backend.base_url().to_string();
    let mut session = ClientSession::new(ctx.user_id, ctx.backend, TerminalSpeaker::new(quiet))
        .with_voice(voice);

    // A server that is down is reported but does not end the session.
    let _ = session.load().await;

    if !quiet {
        print_welcome_banner(
            &server,
            session.user_id(),
            session.voice(),
            session.messages().len(),
        );
    }
    if let Some(error) = session.error() {
        print_error_banner(error);
    }

    info!(user_id = %session.user_id(), %server, "Chat session started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let thinking = session.output_mut().thinking();
    let mut exchanges = 0usize;
    loop {
        let mut capture = CommandFilter::new(&mut chat_input, thinking.clone());
        let result = session.capture_and_submit(&mut capture).await;
        let held = capture.into_held();
        thinking.stop();

        match result {
            Ok(SubmitOutcome::Replied(_)) => {
                exchanges += 1;
                // The exchange succeeded but the resync did not.
                if let Some(error) = session.error() {
                    print_error_banner(error);
                }
            }
            Ok(SubmitOutcome::Failed(error)) => print_error_banner(&error),
            Ok(SubmitOutcome::Ignored) => {}
            Err(e) => {
                warn!(error = %e, "Input failed");
                break;
            }
        }

        match held {
            Held::Nothing => {}
            Held::Closed => break,
            Held::Command(cmd) => match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::ClearScreen => chat_input.clear(),
                ChatCommand::History => show_history(&mut session).await,
                ChatCommand::Stats => show_stats(&session).await,
                ChatCommand::Forget { confirmed } => forget(&mut session, confirmed).await,
                ChatCommand::Exit => break,
                ChatCommand::Unknown(cmd_name) => {
                    println!(
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        cmd_name
                    );
                }
            },
        }
    }

    chat_input.flush();
    info!(user_id = %session.user_id(), exchanges, "Chat session ended");
    println!(
        "\n  {} {}",
        style("Session ended.").dim(),
        style(format!(
            "({exchanges} exchange{})",
            if exchanges == 1 { "" } else { "s" }
        ))
        .dim()
    );

    Ok(())
}

async fn show_history(session: &mut TerminalSession) {
    match session.load().await {
        Ok(()) => {
            let stored: Vec<_> = session
                .messages()
                .iter()
                .filter_map(|m| m.as_persisted().cloned())
                .collect();
            print_messages(&stored);
        }
        Err(_) => print_error_banner(session.error().unwrap_or("Could not load history.")),
    }
}

async fn show_stats(session: &TerminalSession) {
    match session.stats().await {
        Ok(stats) => print_stats(&stats),
        Err(e) => print_error_banner(&e.to_string()),
    }
}

async fn forget(session: &mut TerminalSession, confirmed: bool) {
    if !confirmed {
        println!(
            "  {} This deletes the whole conversation. Type {} to confirm.",
            style("!").yellow().bold(),
            style("/forget yes").yellow()
        );
        return;
    }

    match session.clear_history(&mut Preapproved(true)).await {
        Ok(_) => println!("  {} History deleted.", style("✓").green().bold()),
        Err(_) => print_error_banner(session.error().unwrap_or("Failed to delete history.")),
    }
}
