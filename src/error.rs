//! Error taxonomy for the analysis core.
//!
//! Every failure carries enough context (provider, operation, raw snippet)
//! for the tool layer to render an actionable message.

use std::fmt;

/// Number of characters of raw provider output shown in error messages
const RAW_PREVIEW_CHARS: usize = 200;

/// Classification of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// Connection failures, 5xx responses, undecodable bodies
    Network,
    /// Rejected credentials
    Auth,
    /// Throttled by the vendor
    RateLimit,
    /// The vendor or the HTTP client gave up waiting
    Timeout,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::RateLimit => "rate limit",
            Self::Timeout => "timeout",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by the orchestrator, parser and template resolver
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid credentials, provider selection, or request shape
    #[error("Configuration error: {0}")]
    Config(String),

    /// A provider call failed
    #[error("{provider} request failed ({kind}): {message}")]
    Provider {
        provider: String,
        kind: ProviderErrorKind,
        message: String,
    },

    /// Model output could not be turned into the expected structure
    #[error("Failed to parse {operation} response: {message}. Raw response: {}", preview(.raw))]
    Parse {
        operation: &'static str,
        message: String,
        raw: String,
    },

    /// The per-call deadline elapsed
    #[error("{operation} timed out after {elapsed_ms}ms")]
    Timeout {
        operation: &'static str,
        elapsed_ms: u64,
    },

    /// Template category is not one of the recognized values
    #[error("Unknown template type: {0}. Supported: strategy, indicator")]
    UnknownCategory(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn provider(
        provider: impl Into<String>,
        kind: ProviderErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn parse(operation: &'static str, message: impl Into<String>, raw: &str) -> Self {
        Self::Parse {
            operation,
            message: message.into(),
            raw: raw.to_string(),
        }
    }

    /// Whether a repeat request could plausibly succeed.
    ///
    /// Network hiccups, provider-side timeouts and malformed output are
    /// retried; credentials, throttling, deadlines and config never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider { kind, .. } => {
                matches!(kind, ProviderErrorKind::Network | ProviderErrorKind::Timeout)
            }
            Self::Parse { .. } => true,
            Self::Config(_) | Self::Timeout { .. } | Self::UnknownCategory(_) => false,
        }
    }

    /// Provider failure kind, if this is a provider error
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::Provider { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Full raw provider text attached to a parse failure
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

fn preview(raw: &str) -> String {
    let mut preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
    if raw.chars().count() > RAW_PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(Error::provider("anthropic", ProviderErrorKind::Network, "reset").is_retryable());
        assert!(Error::provider("openai", ProviderErrorKind::Timeout, "slow").is_retryable());
        assert!(!Error::provider("openai", ProviderErrorKind::Auth, "401").is_retryable());
        assert!(!Error::provider("openai", ProviderErrorKind::RateLimit, "429").is_retryable());
        assert!(Error::parse("analysis", "no object", "hello").is_retryable());
        assert!(
            !Error::Timeout {
                operation: "analysis",
                elapsed_ms: 10
            }
            .is_retryable()
        );
        assert!(!Error::Config("missing key".to_string()).is_retryable());
    }

    #[test]
    fn test_parse_error_keeps_full_raw_but_previews_message() {
        let raw = "x".repeat(500);
        let err = Error::parse("analysis", "no JSON object found", &raw);
        assert_eq!(err.raw_response().map(str::len), Some(500));
        let message = err.to_string();
        assert!(message.contains("no JSON object found"));
        assert!(message.len() < 400);
    }

    #[test]
    fn test_unknown_category_message() {
        let err = Error::UnknownCategory("invalid-category".to_string());
        assert!(err.to_string().contains("Unknown template type"));
    }
}
