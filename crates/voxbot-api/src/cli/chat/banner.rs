//! Welcome banner display for chat sessions.

use console::style;

use voxbot_types::config::VoiceSettings;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(
    server: &str,
    user_id: &str,
    voice: &VoiceSettings,
    history_len: usize,
) {
    println!();
    println!("  {}", style("Voxbot").cyan().bold());
    println!("  {}", style("Voice assistant, terminal edition").dim());
    println!();
    println!("  {}   {}", style("Server:").bold(), style(server).dim());
    println!("  {}     {}", style("User:").bold(), style(user_id).dim());
    println!(
        "  {}    {}",
        style("Voice:").bold(),
        style(format!(
            "rate {:.1}, pitch {:.1}, volume {:.1}",
            voice.rate, voice.pitch, voice.volume
        ))
        .dim()
    );
    if history_len > 0 {
        println!(
            "  {}  {}",
            style("History:").bold(),
            style(format!(
                "{history_len} message{}",
                if history_len == 1 { "" } else { "s" }
            ))
            .dim()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

/// Print the session's error banner.
pub fn print_error_banner(message: &str) {
    println!("  {} {}", style("!").red().bold(), style(message).red());
}
