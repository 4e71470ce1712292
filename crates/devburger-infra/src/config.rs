//! Configuration loading for DevBurger.
//!
//! Reads `config.toml` from the data directory (`~/.devburger/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to the
//! defaults when the file is missing or malformed. The API key never lives
//! in the file -- it is read from the environment and wrapped in a
//! [`SecretString`].

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use devburger_types::config::AppConfig;

/// Resolve the data directory: `DEVBURGER_DATA_DIR`, or `~/.devburger`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("DEVBURGER_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".devburger")
        }
    }
}

/// Load agent configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Read the model API key from `OPENAI_API_KEY`.
pub fn api_key_from_env() -> Option<SecretString> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}
