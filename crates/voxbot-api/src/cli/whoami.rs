//! CLI command: `voxbot whoami`.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use voxbot_infra::filesystem::user_id::{load_or_create_user_id, user_id_path};

#[derive(Serialize)]
struct Identity<'a> {
    user_id: String,
    path: String,
    server: &'a str,
}

/// Print the persisted user id, creating it on first use.
pub async fn whoami(data_dir: &Path, server: &str, json: bool) -> Result<()> {
    let identity = Identity {
        user_id: load_or_create_user_id(data_dir).await?,
        path: user_id_path(data_dir).display().to_string(),
        server,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&identity)?);
        return Ok(());
    }

    println!();
    println!("  {}    {}", style("User:").bold(), style(&identity.user_id).cyan());
    println!("  {}  {}", style("Stored:").bold(), style(&identity.path).dim());
    println!("  {}  {}", style("Server:").bold(), style(identity.server).dim());
    println!();
    Ok(())
}
