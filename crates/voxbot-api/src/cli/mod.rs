//! CLI command definitions for the `voxbot` binary.
//!
//! `serve` runs the chat server; every other command is a client of a
//! running server (`--server`, default `http://127.0.0.1:5000`).

pub mod chat;
pub mod history;
pub mod serve;
pub mod speech;
pub mod stats;
pub mod whoami;

use std::path::Path;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use voxbot_infra::client::{DEFAULT_SERVER_URL, HttpChatBackend};
use voxbot_infra::filesystem::user_id::load_or_create_user_id;

/// Client requests include the relay round trip, so allow more than Gemini's own timeout.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Talk to a Gemini-backed assistant and keep the conversation.
#[derive(Parser)]
#[command(name = "voxbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Chat server to talk to.
    #[arg(long, global = true, env = "VOXBOT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat server.
    Serve {
        /// Port to listen on (overrides config.toml and VOXBOT_PORT).
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml and VOXBOT_HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Start an interactive conversation.
    Chat {
        /// Speech rate, 0.5 to 2.
        #[arg(long, default_value_t = 1.0)]
        rate: f32,

        /// Speech pitch, 0.5 to 2.
        #[arg(long, default_value_t = 1.0)]
        pitch: f32,

        /// Speech volume, 0 to 1.
        #[arg(long, default_value_t = 1.0)]
        volume: f32,
    },

    /// Show the stored conversation.
    History,

    /// Delete the stored conversation.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        force: bool,
    },

    /// Show message counts by sender and hour.
    Stats,

    /// Show this installation's user id.
    Whoami,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Everything a client command needs: who we are and where the server is.
pub struct ClientContext {
    pub user_id: String,
    pub backend: HttpChatBackend,
}

impl ClientContext {
    pub async fn init(data_dir: &Path, server: &str) -> anyhow::Result<Self> {
        let user_id = load_or_create_user_id(data_dir).await.map_err(|e| {
            anyhow::anyhow!("Failed to load user id from {}: {e}", data_dir.display())
        })?;
        let backend = HttpChatBackend::new(server, CLIENT_TIMEOUT)?;
        tracing::debug!(%user_id, server = %backend.base_url(), "Client initialized");
        Ok(Self { user_id, backend })
    }
}
