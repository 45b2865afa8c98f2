//! Filesystem helpers for Voxbot.
//!
//! Data directory resolution and the client's persisted user id.

pub mod user_id;

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `VOXBOT_DATA_DIR` environment variable
/// 2. `~/.voxbot`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VOXBOT_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".voxbot");
    }

    // Last resort: current directory
    PathBuf::from(".voxbot")
}
