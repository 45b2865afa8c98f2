//! CLI command: `voxbot stats`.

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use console::style;

use voxbot_core::session::client::ClientSession;
use voxbot_types::chat::ChatStats;

use crate::cli::ClientContext;
use crate::cli::speech::TerminalSpeaker;

/// Widest bar in the hourly table.
const BAR_WIDTH: u64 = 30;

pub async fn show_stats(ctx: ClientContext, json: bool) -> Result<()> {
    let session = ClientSession::new(ctx.user_id, ctx.backend, TerminalSpeaker::new(true));
    let stats = session.stats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }
    Ok(())
}

/// Print totals, then one row per hour that has messages.
pub fn print_stats(stats: &ChatStats) {
    println!();
    println!(
        "  {}  {}   {}  {}   {}  {}",
        style("Total:").bold(),
        style(stats.total).cyan(),
        style("You:").bold(),
        style(stats.user_count).green(),
        style("Bot:").bold(),
        style(stats.bot_count).cyan()
    );
    println!();

    if stats.total == 0 {
        println!("  {} No messages yet.", style("i").blue().bold());
        println!();
        return;
    }

    let peak = stats.hourly.iter().map(|h| h.count).max().unwrap_or(0);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Hour (UTC)").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("").fg(Color::White),
    ]);

    for bucket in stats.hourly.iter().filter(|h| h.count > 0) {
        table.add_row(vec![
            Cell::new(format!("{:02}:00", bucket.hour)).fg(Color::DarkGrey),
            Cell::new(bucket.count).set_alignment(CellAlignment::Right),
            Cell::new(bar(bucket.count, peak)).fg(Color::Cyan),
        ]);
    }

    println!("{table}");
    println!();
}

/// Bar scaled against the busiest hour; any non-zero count gets at least one block.
fn bar(count: u64, peak: u64) -> String {
    if count == 0 || peak == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(peak).max(1);
    "█".repeat(width as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH as usize);
        assert_eq!(bar(5, 10).chars().count(), 15);
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }
}
