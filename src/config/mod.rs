use crate::services::format::Locale;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub locale: Locale,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound when fetching the full fighter list for slug resolution.
    #[serde(default = "default_fighters_limit")]
    pub fighters_limit: u32,
    #[serde(default = "default_events_limit")]
    pub events_limit: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            fighters_limit: default_fighters_limit(),
            events_limit: default_events_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Fights shown on a fighter page before the "showing N of M" note.
    #[serde(default = "default_recent_fights")]
    pub recent_fights: usize,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_fights: default_recent_fights(),
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

fn default_title() -> String {
    "Fightcard".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_fighters_limit() -> u32 {
    1000
}

fn default_events_limit() -> u32 {
    100
}

fn default_recent_fights() -> usize {
    5
}

fn default_upcoming_limit() -> u32 {
    50
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run `fightcard init` to create one.",
                path.display(),
                e
            )
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.backend.base_url).map_err(|e| {
            anyhow::anyhow!("backend.base_url '{}' is not a valid URL: {}", self.backend.base_url, e)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("backend.base_url must use http or https");
        }
        if self.backend.timeout_secs == 0 || self.backend.timeout_secs > 120 {
            anyhow::bail!("backend.timeout_secs must be between 1 and 120");
        }
        if self.backend.fighters_limit == 0 {
            anyhow::bail!("backend.fighters_limit must be greater than 0");
        }
        if self.backend.events_limit == 0 {
            anyhow::bail!("backend.events_limit must be greater than 0");
        }
        if self.display.recent_fights == 0 || self.display.recent_fights > 50 {
            anyhow::bail!("display.recent_fights must be between 1 and 50");
        }
        if self.display.upcoming_limit == 0 {
            anyhow::bail!("display.upcoming_limit must be greater than 0");
        }
        Ok(())
    }
}
