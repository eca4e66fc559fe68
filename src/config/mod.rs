//! Configuration management for coursetrack

pub mod progress;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Environment variable overriding the API base URL
pub const API_BASE_URL_ENV: &str = "COURSETRACK_API_BASE_URL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the LMS REST API
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Extra attempts for retryable failures
    pub max_retries: u32,

    /// Delay between attempts in milliseconds
    pub retry_delay_ms: u64,

    /// Selected theme name
    pub theme: String,

    /// Vim mode enabled
    pub vim_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            request_timeout_secs: 30,
            max_retries: 2,
            retry_delay_ms: 1000,
            theme: "Tokyo Night".to_string(),
            vim_mode: true,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    ///
    /// The API base URL can be overridden per invocation with
    /// `COURSETRACK_API_BASE_URL`.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.apply_env_override(std::env::var(API_BASE_URL_ENV).ok());
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("API base URL overridden from environment: {}", url);
            self.api_base_url = url;
        }
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "coursetrack")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "coursetrack")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Delay between retries
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        Theme::tokyo_night()
    }
}
