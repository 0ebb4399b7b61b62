//! LLM Provider configuration.
//!
//! Single source of truth for supported providers and their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default per-call deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Supported text-generation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Anthropic,
    OpenAI,
    /// Deterministic offline backend
    Mock,
}

impl Provider {
    /// All available providers
    pub const ALL: &'static [Provider] = &[Provider::Anthropic, Provider::OpenAI, Provider::Mock];

    /// Provider name as used in config files and tool arguments
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAI => "openai",
            Self::Mock => "mock",
        }
    }

    /// Default model used when none is configured
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAI => "gpt-4.1",
            Self::Mock => "mock-pine-1",
        }
    }

    /// Environment variable name for the API key
    pub const fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Mock => None,
        }
    }

    /// Whether requests need credentials
    pub const fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Mock)
    }

    /// Get all provider names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let normalized = match lower.as_str() {
            "claude" => "anthropic",
            "gpt" => "openai",
            other => other,
        };

        Self::ALL
            .iter()
            .find(|p| p.name() == normalized)
            .copied()
            .ok_or_else(|| {
                Error::Config(format!(
                    "Unknown provider: {s}. Supported: {}",
                    Self::all_names().join(", ")
                ))
            })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolved settings for one provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: Provider,
    /// API key (loaded from env or config)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    /// Deadline for a whole call, retries included
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ProviderConfig {
    /// Create config with defaults for a provider
    pub fn with_defaults(provider: Provider) -> Self {
        Self {
            provider,
            api_key: String::new(),
            model: provider.default_model().to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Offline configuration backed by the mock provider
    pub fn mock() -> Self {
        Self::with_defaults(Provider::Mock)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Get effective model (configured or default)
    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check if this config has an API key set
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Reject configurations that can never produce a successful call
    pub fn validate(&self) -> Result<()> {
        if self.provider.requires_api_key() && !self.has_api_key() {
            return Err(Error::Config(format!(
                "API key required for provider: {}",
                self.provider
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Config(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
