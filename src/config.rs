use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Largest page the API will serve for list endpoints.
pub const MAX_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceTradersConfig {
    pub api: ApiConfig,
    pub retry: RetryConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Page size used by paginated list endpoints
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Attempts per page before a throttled request gives up
    pub max_attempts: u32,
    /// Extra wait added on top of the server's cooldown, in milliseconds
    pub cooldown_pad_ms: u64,
    /// Fixed wait after a 429, in milliseconds
    pub rate_limit_wait_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Location of the JSON cache document
    pub path: String,
    /// How long cached agent info stays fresh
    pub agent_ttl_minutes: i64,
    /// How long the cached ship list stays fresh
    pub ship_list_ttl_minutes: i64,
}

impl Default for SpaceTradersConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: crate::API_BASE_URL.to_string(),
                timeout_seconds: 30,
                page_size: MAX_PAGE_SIZE,
            },
            retry: RetryConfig {
                max_attempts: 5,
                cooldown_pad_ms: 250,
                rate_limit_wait_ms: 1000,
            },
            cache: CacheConfig {
                path: ".cache/data.json".to_string(),
                agent_ttl_minutes: 60,
                ship_list_ttl_minutes: 60,
            },
        }
    }
}

impl RetryConfig {
    pub fn cooldown_pad(&self) -> Duration {
        Duration::from_millis(self.cooldown_pad_ms)
    }

    pub fn rate_limit_wait(&self) -> Duration {
        Duration::from_millis(self.rate_limit_wait_ms)
    }
}

impl CacheConfig {
    pub fn agent_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.agent_ttl_minutes)
    }

    pub fn ship_list_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.ship_list_ttl_minutes)
    }
}

impl SpaceTradersConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, ConfigError> {
        if Path::new(config_path).exists() {
            info!("Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
                path: config_path.to_string(),
                source,
            })?;
            let config: SpaceTradersConfig =
                toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
                    path: config_path.to_string(),
                    source,
                })?;
            Ok(config)
        } else {
            info!("Creating default configuration at {}", config_path);
            let config = SpaceTradersConfig::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: config_path.to_string(),
            source,
        };

        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str).map_err(io_err)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
        }
        if self.api.page_size == 0 || self.api.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "api.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }
        if self.cache.path.trim().is_empty() {
            return Err(ConfigError::Invalid("cache.path must not be empty".to_string()));
        }
        if self.cache.agent_ttl_minutes <= 0 || self.cache.ship_list_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid(
                "cache TTLs must be positive".to_string(),
            ));
        }

        debug!("Configuration validation passed");
        Ok(())
    }

    pub fn log_summary(&self) {
        debug!(
            base_url = %self.api.base_url,
            page_size = self.api.page_size,
            max_attempts = self.retry.max_attempts,
            cache_path = %self.cache.path,
            agent_ttl_minutes = self.cache.agent_ttl_minutes,
            ship_list_ttl_minutes = self.cache.ship_list_ttl_minutes,
            "Configuration summary"
        );
    }
}
