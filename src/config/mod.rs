use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::infrastructure::registry::FOUR_BYTE_API_ENDPOINT;

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Request timeout; unset leaves the HTTP client default (none)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// "trace" | "debug" | "info" | "warn" | "error", or a full filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            timeout_secs: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_registry_url() -> String {
    FOUR_BYTE_API_ENDPOINT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load config from `explicit`, or from the default location
pub fn load(explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) => path,
            None => return Config::default(),
        },
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content).unwrap_or_default()
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("INSIGHT_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("calldata-insight").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("calldata-insight").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "calldata-insight", "calldata-insight")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.registry.url, FOUR_BYTE_API_ENDPOINT);
        assert_eq!(config.registry.timeout_secs, None);
        assert_eq!(config.log.level, "info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_parse_overrides() {
        let config = parse(
            r#"
            [registry]
            url = "http://localhost:9000/signatures/"
            timeout_secs = 5

            [log]
            level = "calldata_insight=debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.registry.url, "http://localhost:9000/signatures/");
        assert_eq!(config.registry.timeout_secs, Some(5));
        assert_eq!(config.log.level, "calldata_insight=debug");
        assert!(config.log.json);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load(Some(Path::new("/nonexistent/calldata-insight.toml")));
        assert_eq!(config.registry.url, FOUR_BYTE_API_ENDPOINT);
    }
}
