//! Server configuration loader for Voxbot.
//!
//! Reads `config.toml` from the data directory (`~/.voxbot/` in production)
//! into [`ServerConfig`], then layers environment variables on top. Falls back
//! to defaults when the file is missing or malformed.

use std::path::Path;

use voxbot_types::config::ServerConfig;

pub const CONFIG_FILE: &str = "config.toml";

/// Load `{data_dir}/config.toml` and apply process environment overrides.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let mut config = load_config_file(data_dir).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Load `{data_dir}/config.toml` without environment overrides.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config_file(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// Apply `VOXBOT_*` / `GEMINI_*` overrides read through `lookup`.
///
/// Blank values are ignored. An unparsable port is logged and ignored.
pub fn apply_env_overrides(config: &mut ServerConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(host) = get("VOXBOT_HOST") {
        config.host = host.trim().to_string();
    }

    if let Some(port) = get("VOXBOT_PORT").or_else(|| get("PORT")) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.port = port,
            Err(err) => tracing::warn!("Ignoring invalid port '{port}': {err}"),
        }
    }

    if let Some(url) = get("VOXBOT_DATABASE_URL") {
        config.database_url = Some(url.trim().to_string());
    }

    if let Some(origins) = get("VOXBOT_CORS_ORIGINS") {
        config.cors_allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(key) = get("GEMINI_API_KEY") {
        config.relay.api_key = Some(key);
    }

    if let Some(model) = get("GEMINI_MODEL") {
        config.relay.model = model.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_config_file_missing_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_file(tmp.path()).await;
        assert_eq!(config.port, 5000);
        assert!(config.relay.api_key.is_none());
    }

    #[tokio::test]
    async fn load_config_file_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
host = "0.0.0.0"
port = 8080

[relay]
model = "gemini-2.0-flash"
fallback_reply = "Pardon?"
"#,
        )
        .await
        .unwrap();

        let config = load_config_file(tmp.path()).await;
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.relay.model, "gemini-2.0-flash");
        assert_eq!(config.relay.fallback_reply, "Pardon?");
    }

    #[tokio::test]
    async fn load_config_file_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config_file(tmp.path()).await;
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ServerConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("VOXBOT_HOST", "0.0.0.0"),
                ("PORT", "7000"),
                ("VOXBOT_DATABASE_URL", "sqlite::memory:"),
                ("VOXBOT_CORS_ORIGINS", "http://localhost:5173, https://app.example.com,"),
                ("GEMINI_API_KEY", "abc123"),
                ("GEMINI_MODEL", "gemini-2.5-pro"),
            ]),
        );

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7000);
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "https://app.example.com"]
        );
        assert_eq!(config.relay.api_key(), Some("abc123"));
        assert_eq!(config.relay.model, "gemini-2.5-pro");
    }

    #[test]
    fn voxbot_port_wins_over_port() {
        let mut config = ServerConfig::default();
        apply_env_overrides(&mut config, env(&[("VOXBOT_PORT", "6000"), ("PORT", "7000")]));
        assert_eq!(config.port, 6000);
    }

    #[test]
    fn invalid_and_blank_values_are_ignored() {
        let mut config = ServerConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("VOXBOT_PORT", "not-a-port"), ("GEMINI_API_KEY", "  ")]),
        );
        assert_eq!(config.port, 5000);
        assert!(config.relay.api_key.is_none());
    }
}
