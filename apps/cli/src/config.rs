//! Configuration loading.
//!
//! Configuration is stored as TOML:
//! - Linux/macOS: `$XDG_CONFIG_HOME/chunkup/config.toml` or `~/.config/chunkup/config.toml`
//! - Windows: `%APPDATA%/chunkup/config.toml`

use std::path::{Path, PathBuf};

use anyhow::Context;
use chunkup_client::ClientConfig;

/// Loads configuration from `path`, or from the default location.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load(path: Option<&Path>) -> anyhow::Result<ClientConfig> {
    match path {
        Some(path) => read(path),
        None => {
            let path = config_path();
            if path.exists() {
                read(&path)
            } else {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(ClientConfig::default())
            }
        }
    }
}

fn read(path: &Path) -> anyhow::Result<ClientConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("chunkup").join("config.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let base = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
                PathBuf::from(home).join(".config")
            });
        base.join("chunkup").join("config.toml")
    }
}
