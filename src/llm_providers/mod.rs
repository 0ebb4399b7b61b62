//! Text-generation backends.
//!
//! Every backend implements [`ProviderClient`]: send a prompt, get raw text
//! back. Which one is used depends only on [`Provider`].

mod anthropic;
mod mock;
mod openai;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use openai::OpenAIProvider;

use crate::error::{Error, ProviderErrorKind, Result};
use crate::providers::{Provider, ProviderConfig};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Capability shared by all text-generation backends
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Send a single-turn prompt and return the model's raw text
    async fn send(&self, prompt: &str, config: &ProviderConfig) -> Result<String>;
}

/// Construct the backend for `provider`
pub fn client_for(provider: Provider) -> Arc<dyn ProviderClient> {
    match provider {
        Provider::Anthropic => Arc::new(AnthropicProvider::new()),
        Provider::OpenAI => Arc::new(OpenAIProvider::new()),
        Provider::Mock => Arc::new(MockProvider::new()),
    }
}

fn http_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Map an unsuccessful HTTP status to a provider error
pub(crate) fn classify_status(provider: &str, status: StatusCode, body: &str) -> Error {
    let kind = match status.as_u16() {
        401 | 403 => ProviderErrorKind::Auth,
        429 => ProviderErrorKind::RateLimit,
        408 | 504 => ProviderErrorKind::Timeout,
        _ => ProviderErrorKind::Network,
    };
    Error::provider(
        provider,
        kind,
        format!("API request failed with status {status}: {body}"),
    )
}

/// Map a transport-level failure to a provider error
pub(crate) fn classify_transport(provider: &str, err: &reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        ProviderErrorKind::Timeout
    } else {
        ProviderErrorKind::Network
    };
    Error::provider(provider, kind, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let kind = |code: u16| {
            classify_status(
                "anthropic",
                StatusCode::from_u16(code).expect("valid status"),
                "",
            )
            .provider_kind()
        };
        assert_eq!(kind(401), Some(ProviderErrorKind::Auth));
        assert_eq!(kind(403), Some(ProviderErrorKind::Auth));
        assert_eq!(kind(429), Some(ProviderErrorKind::RateLimit));
        assert_eq!(kind(504), Some(ProviderErrorKind::Timeout));
        assert_eq!(kind(500), Some(ProviderErrorKind::Network));
        assert_eq!(kind(404), Some(ProviderErrorKind::Network));
    }

    #[test]
    fn test_status_error_names_provider() {
        let err = classify_status("openai", StatusCode::UNAUTHORIZED, "bad key");
        let message = err.to_string();
        assert!(message.contains("openai"));
        assert!(message.contains("bad key"));
    }

    #[test]
    fn test_client_selection_follows_provider() {
        for provider in Provider::ALL {
            assert_eq!(client_for(*provider).name(), provider.name());
        }
    }
}
