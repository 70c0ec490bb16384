//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the backend URL, request timeout, the gender tab and roster toggle to
//! start with, and the last meet that was open.
//!
//! Configuration is stored at `~/.config/meetdesk/config.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::models::Gender;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "meetdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "MEETDESK_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub default_gender: Option<Gender>,
    #[serde(default)]
    pub show_inactive_athletes: bool,
    #[serde(default)]
    pub last_meet_id: Option<i64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }

    /// Backend URL: environment override, then config, then the default.
    pub fn base_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn starting_gender(&self) -> Gender {
        self.default_gender
            .filter(|g| g.is_partition())
            .unwrap_or(Gender::Male)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            api_base_url: Some("http://configured:5000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.base_url(Some("http://env:8080".to_string())),
            "http://env:8080"
        );
        assert_eq!(config.base_url(Some("  ".to_string())), "http://configured:5000");
        assert_eq!(config.base_url(None), "http://configured:5000");
        assert_eq!(Config::default().base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_timeout_and_gender_defaults() {
        let config = Config {
            request_timeout_secs: Some(0),
            default_gender: Some(Gender::Other),
            ..Default::default()
        };
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.starting_gender(), Gender::Male);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = serde_json::from_str(r#"{"default_gender": "F"}"#).unwrap();
        assert_eq!(config.starting_gender(), Gender::Female);
        assert!(!config.show_inactive_athletes);
    }
}
