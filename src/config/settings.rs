// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;
use crate::health::{default_services, ServiceEndpoint};
use crate::modes::ChatMode;
use crate::prompts::DEFAULT_MAX_PROMPTS;

/// Demo API connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as `X-API-Key` to services that need it
    pub api_key: Option<String>,
    pub chat_timeout_secs: u64,
    pub health_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            chat_timeout_secs: DEFAULT_CHAT_TIMEOUT_SECS,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub max_prompts: usize,
    /// JSON prompt table replacing the built-in one
    pub table_path: Option<PathBuf>,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            max_prompts: DEFAULT_MAX_PROMPTS,
            table_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    /// Defaults to ~/.habu-assistant
    pub state_dir: Option<PathBuf>,
    pub debounce_ms: u64,
    pub max_history: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_dir: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_history: crate::conversation::MAX_PERSISTED_MESSAGES,
        }
    }
}

impl PersistenceConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub poll_interval_secs: u64,
    pub services: Vec<ServiceEndpoint>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            services: default_services(),
        }
    }
}

impl HealthConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub default_mode: ChatMode,
    /// Answer locally without calling the API
    pub offline: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Enable debug logging for troubleshooting
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub prompts: PromptsConfig,
    pub persistence: PersistenceConfig,
    pub health: HealthConfig,
    pub chat: ChatConfig,
    pub features: FeaturesConfig,
}

impl Config {
    /// Directory holding persisted conversation state
    pub fn state_dir(&self) -> Option<PathBuf> {
        self.persistence
            .state_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(APP_DIR)))
    }

    /// Apply `HABU_*` overrides from the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api.api_key = Some(key);
        }
        if let Some(dir) = non_empty(ENV_STATE_DIR) {
            self.persistence.state_dir = Some(PathBuf::from(dir));
        }
    }

    /// Health endpoints with the configured API key filled in where missing
    pub fn health_services(&self) -> Vec<ServiceEndpoint> {
        self.health
            .services
            .iter()
            .cloned()
            .map(|mut service| {
                if service.api_key.is_none() {
                    service.api_key = self.api.api_key.clone();
                }
                service
            })
            .collect()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if self.api.chat_timeout_secs == 0 {
            anyhow::bail!("api.chat_timeout_secs must be greater than zero");
        }
        if self.api.health_timeout_secs == 0 {
            anyhow::bail!("api.health_timeout_secs must be greater than zero");
        }
        if self.prompts.max_prompts == 0 {
            anyhow::bail!("prompts.max_prompts must be greater than zero");
        }
        if self.health.poll_interval_secs == 0 {
            anyhow::bail!("health.poll_interval_secs must be greater than zero");
        }
        Ok(())
    }
}
