//! CLI command: `voxbot serve`.

use std::path::Path;

use console::style;
use tracing::info;

use voxbot_infra::config::load_server_config;

use crate::http::router::build_router;
use crate::state::AppState;

/// Load config, open the store and serve until Ctrl+C or SIGTERM.
pub async fn serve(
    data_dir: &Path,
    host: Option<String>,
    port: Option<u16>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut config = load_server_config(data_dir).await;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let addr = format!("{}:{}", config.host, config.port);
    let model = config.relay.model.clone();
    let state = AppState::init(data_dir, config).await?;
    let pool = state.db_pool.clone();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, %model, data_dir = %data_dir.display(), "Chat server listening");

    if !quiet {
        println!(
            "  {} Voxbot listening on {}",
            style("⚡").bold(),
            style(format!("http://{addr}")).cyan()
        );
        println!("  {}  {}", style("Model:").bold(), style(&model).dim());
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
