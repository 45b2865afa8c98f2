//! Voxbot chat server and terminal client entry point.
//!
//! Binary name: `voxbot`
//!
//! Parses CLI arguments, sets up tracing, then either starts the REST API
//! server or runs a client command against one.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, ClientContext, Commands};
use voxbot_infra::filesystem::resolve_data_dir;
use voxbot_observe::tracing_setup::{init_tracing, shutdown_tracing};
use voxbot_types::config::VoiceSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The server logs requests by default; client commands stay quiet.
    let serving = matches!(cli.command, Commands::Serve { .. });
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if serving => "info",
        0 => "warn",
        1 => "info,voxbot_api=debug,voxbot_core=debug,voxbot_infra=debug",
        _ => "trace",
    };

    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need a data directory
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "voxbot", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();

    match cli.command {
        Commands::Serve { port, host } => {
            cli::serve::serve(&data_dir, host, port, cli.quiet).await?;
        }

        Commands::Chat {
            rate,
            pitch,
            volume,
        } => {
            let ctx = ClientContext::init(&data_dir, &cli.server).await?;
            let voice = VoiceSettings::new(rate, pitch, volume);
            cli::chat::loop_runner::run_chat_loop(ctx, voice, cli.quiet).await?;
        }

        Commands::History => {
            let ctx = ClientContext::init(&data_dir, &cli.server).await?;
            cli::history::show_history(ctx, cli.json).await?;
        }

        Commands::Clear { force } => {
            let ctx = ClientContext::init(&data_dir, &cli.server).await?;
            cli::history::clear_history(ctx, force, cli.json).await?;
        }

        Commands::Stats => {
            let ctx = ClientContext::init(&data_dir, &cli.server).await?;
            cli::stats::show_stats(ctx, cli.json).await?;
        }

        Commands::Whoami => {
            cli::whoami::whoami(&data_dir, &cli.server, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
