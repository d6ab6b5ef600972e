//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for akito
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub download: DownloadConfig,
    pub wuxiaworld: WuxiaWorldConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: akito_core::http::DEFAULT_TIMEOUT.as_secs(),
            user_agent: concat!("akito/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Concurrent chapter requests per batch
    pub workers: usize,
    /// Free a worker slot as soon as a page is downloaded, before parsing
    pub early_release: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            workers: akito_core::DEFAULT_CAPACITY,
            early_release: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WuxiaWorldConfig {
    pub base_url: String,
    pub max_search_pages: usize,
}

impl Default for WuxiaWorldConfig {
    fn default() -> Self {
        Self {
            base_url: akito_wuxiaworld::config::DEFAULT_BASE_URL.to_string(),
            max_search_pages: akito_wuxiaworld::config::DEFAULT_MAX_SEARCH_PAGES,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./akito.toml (current directory)
    /// 2. ~/.config/akito/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("akito.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "akito") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Request options shared by every site request
    pub fn request_options(&self) -> akito_core::RequestOptions {
        akito_core::RequestOptions::new()
            .header("User-Agent", self.http.user_agent.as_str())
            .timeout(Duration::from_secs(self.http.timeout_secs))
    }

    pub fn wuxiaworld(&self) -> akito_wuxiaworld::Config {
        akito_wuxiaworld::Config {
            base_url: self.wuxiaworld.base_url.clone(),
            request: self.request_options(),
            max_search_pages: self.wuxiaworld.max_search_pages,
        }
    }
}
