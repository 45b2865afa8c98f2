//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`; anything else is an utterance for the assistant.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    ClearScreen,
    /// Delete the stored conversation. `confirmed` is set by `/forget yes`.
    Forget { confirmed: bool },
    /// Reprint the conversation.
    History,
    /// Show message counts.
    Stats,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, ' ');
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(|s| s.trim().to_lowercase());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::ClearScreen),
        "/forget" => Some(ChatCommand::Forget {
            confirmed: matches!(arg.as_deref(), Some("yes" | "y")),
        }),
        "/history" => Some(ChatCommand::History),
        "/stats" => Some(ChatCommand::Stats),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}   {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}     {}", style("/stats").cyan(), "Show message counts");
    println!(
        "  {} {}",
        style("/forget yes").cyan(),
        "Delete the stored conversation"
    );
    println!("  {}      {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C keeps the session open").dim()
    );
    println!();
}
