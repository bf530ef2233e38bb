//! TOML configuration parsing and validation.
//!
//! Every section has defaults, so an empty file is a valid configuration.
//! The default search source is deliberately *not* configured here: it is
//! read from the `SCON_SEARCH_SOURCE` environment variable when the store
//! is mounted.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

/// Where the name-listing backend lives.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_filenames_path")]
    pub filenames_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            filenames_path: default_filenames_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_filenames_path() -> String {
    "/api/filenames".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    /// Full URL of the filename listing endpoint.
    pub fn filenames_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.filenames_path
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    #[serde(default = "default_debug_panel_visible")]
    pub debug_panel_visible: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            debug_panel_visible: default_debug_panel_visible(),
        }
    }
}

fn default_debug_panel_visible() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

/// Loads `path` if it exists, otherwise falls back to [`Config::minimal`].
///
/// A file that exists but does not parse or validate is still an error.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Validate server
    if config.server.bind.trim().is_empty() {
        bail!("server.bind must not be empty");
    }

    // Validate api
    if !(config.api.base_url.starts_with("http://") || config.api.base_url.starts_with("https://"))
    {
        bail!(
            "api.base_url must start with http:// or https://, got '{}'",
            config.api.base_url
        );
    }
    if !config.api.filenames_path.starts_with('/') {
        bail!(
            "api.filenames_path must start with '/', got '{}'",
            config.api.filenames_path
        );
    }
    if config.api.timeout_secs == 0 {
        bail!("api.timeout_secs must be > 0");
    }

    // Validate logging
    match config.logging.level.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => {}
        other => bail!(
            "Unknown logging.level: '{}'. Must be error, warn, info, debug, or trace.",
            other
        ),
    }
    match config.logging.format.as_str() {
        "compact" | "pretty" | "json" => {}
        other => bail!(
            "Unknown logging.format: '{}'. Must be compact, pretty, or json.",
            other
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:7340");
        assert_eq!(
            config.api.filenames_url(),
            "http://127.0.0.1:8000/api/filenames"
        );
        assert!(config.layout.debug_panel_visible);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_file_parses() {
        let config = parse_config(
            r#"
[server]
bind = "0.0.0.0:9000"

[api]
base_url = "https://search.example.com/"
filenames_path = "/static/files"
timeout_secs = 3

[layout]
debug_panel_visible = false

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(
            config.api.filenames_url(),
            "https://search.example.com/static/files"
        );
        assert_eq!(config.api.timeout_secs, 3);
        assert!(!config.layout.debug_panel_visible);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = parse_config("[api]\nbase_url = \"ftp://x\"\n").unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_rejects_relative_filenames_path() {
        let err = parse_config("[api]\nfilenames_path = \"files\"\n").unwrap_err();
        assert!(err.to_string().contains("api.filenames_path"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = parse_config("[api]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("api.timeout_secs"));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = parse_config("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_missing_file_falls_back_to_minimal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_config_or_default(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:7340");
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("scon.toml");
        std::fs::write(&path, "[server\nbind = 1").unwrap();
        assert!(load_config_or_default(&path).is_err());
    }
}
