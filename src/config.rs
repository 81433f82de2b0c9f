use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::focus::NavigationStyle;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v2/hianime";
pub const API_URL_ENV: &str = "ANIMESTREAM_API_URL";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_spotlight_interval() -> u64 {
    8
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    /// Never touch the network; serve the built-in catalog.
    #[serde(default)]
    pub offline: bool,
    /// Seconds between spotlight slides. 0 disables rotation.
    #[serde(default = "default_spotlight_interval")]
    pub spotlight_interval_secs: u64,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    #[serde(default)]
    pub navigation: NavigationStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            offline: false,
            spotlight_interval_secs: default_spotlight_interval(),
            request_timeout_secs: default_timeout(),
            max_retries: default_retries(),
            navigation: NavigationStyle::default(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "animestream", "animestream")
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|p| p.config_dir().join("config.json"))
    }

    /// Directory for the log file.
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|p| p.data_dir().to_path_buf())
    }

    /// Reads `config.json` if present, then applies the environment override.
    pub fn load() -> Result<Self, anyhow::Error> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                Self::from_json(&content)?
            }
            _ => AppConfig::default(),
        };
        config.apply_env(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(content).map_err(|e| anyhow::anyhow!("invalid config.json: {}", e))
    }

    pub fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }

    pub fn spotlight_interval(&self) -> Option<std::time::Duration> {
        match self.spotlight_interval_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}
