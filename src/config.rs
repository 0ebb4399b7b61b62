use crate::error::{Error, Result};
use crate::log_debug;
use crate::providers::{DEFAULT_TIMEOUT_MS, Provider, ProviderConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default pause before the single retry
pub const DEFAULT_BACKOFF_MS: u64 = 1_000;

/// Read-only source of provider settings.
///
/// The orchestrator asks for its config once at construction and never
/// writes back.
pub trait ConfigStore: Send + Sync {
    /// Settings for the selected provider
    fn provider_config(&self) -> Result<ProviderConfig>;

    /// Pause before retrying a transient failure
    fn retry_backoff(&self) -> Duration {
        Duration::from_millis(DEFAULT_BACKOFF_MS)
    }
}

/// Configuration structure for Pine-Iris
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Selected provider name
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Provider-specific configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ProviderSettings {
    /// API key for the provider
    #[serde(default)]
    pub api_key: String,
    /// Model to be used with the provider
    #[serde(default)]
    pub model: String,
    /// Per-call deadline override
    pub timeout_ms: Option<u64>,
}

/// Retry behaviour for transient failures
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RetryConfig {
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

fn default_provider() -> String {
    Provider::default().name().to_string()
}

fn default_backoff_ms() -> u64 {
    DEFAULT_BACKOFF_MS
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid configuration format: {e}")))?;
        log_debug!("Configuration parsed for provider: {}", config.provider);
        Ok(config)
    }

    /// Build a configuration purely from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(provider) = std::env::var("PINE_IRIS_PROVIDER") {
            config.provider = provider;
        }

        let settings = config.providers.entry(config.provider.clone()).or_default();
        if let Ok(model) = std::env::var("PINE_IRIS_MODEL") {
            settings.model = model;
        }
        if let Some(timeout) = std::env::var("PINE_IRIS_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            settings.timeout_ms = Some(timeout);
        }

        config.with_env_overrides()
    }

    /// Fill empty API keys from the vendor's environment variable
    pub fn with_env_overrides(mut self) -> Self {
        for provider in Provider::ALL {
            let Some(var) = provider.api_key_env() else {
                continue;
            };
            let Ok(key) = std::env::var(var) else {
                continue;
            };
            let settings = self
                .providers
                .entry(provider.name().to_string())
                .or_default();
            if settings.api_key.is_empty() {
                log_debug!("Using API key from {}", var);
                settings.api_key = key;
            }
        }
        self
    }

    /// Get the configuration for a specific provider
    pub fn get_provider_settings(&self, provider: Provider) -> Option<&ProviderSettings> {
        self.providers.get(provider.name()).or_else(|| {
            self.providers
                .iter()
                .find(|(name, _)| name.parse::<Provider>().ok() == Some(provider))
                .map(|(_, settings)| settings)
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            providers: HashMap::new(),
            retry: RetryConfig::default(),
        }
    }
}

impl ConfigStore for Config {
    fn provider_config(&self) -> Result<ProviderConfig> {
        let provider: Provider = self.provider.parse()?;
        let mut resolved = ProviderConfig::with_defaults(provider);

        if let Some(settings) = self.get_provider_settings(provider) {
            resolved.api_key.clone_from(&settings.api_key);
            if !settings.model.is_empty() {
                resolved.model.clone_from(&settings.model);
            }
            resolved.timeout_ms = settings.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        }

        resolved.validate()?;
        Ok(resolved)
    }

    fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry.backoff_ms)
    }
}

impl ConfigStore for ProviderConfig {
    fn provider_config(&self) -> Result<ProviderConfig> {
        self.validate()?;
        Ok(self.clone())
    }
}
