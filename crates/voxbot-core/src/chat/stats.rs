//! Dashboard aggregation over one user's history.

use chrono::Timelike;
use voxbot_types::chat::{ChatMessage, ChatStats, Sender};

/// Count messages by sender and by UTC hour of `created_at`.
pub fn compute_stats(messages: &[ChatMessage]) -> ChatStats {
    let mut stats = ChatStats::default();

    for message in messages {
        stats.total += 1;
        match message.sender {
            Sender::User => stats.user_count += 1,
            Sender::Bot => stats.bot_count += 1,
        }
        stats.hourly[message.created_at.hour() as usize].count += 1;
    }

    stats
}
