use super::{MAX_OUTPUT_TOKENS, ProviderClient, classify_status, classify_transport, http_client};
use crate::error::{Error, ProviderErrorKind, Result};
use crate::log_debug;
use crate::providers::ProviderConfig;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const NAME: &str = "anthropic";

/// Anthropic Messages API backend
pub struct AnthropicProvider {
    client: Client,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicProvider {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for AnthropicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for AnthropicProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send(&self, prompt: &str, config: &ProviderConfig) -> Result<String> {
        let request_body = json!({
            "model": config.effective_model(),
            "max_tokens": MAX_OUTPUT_TOKENS,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        log_debug!("Sending {} chars to {}", prompt.len(), API_URL);
        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_transport(NAME, &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(NAME, status, &text));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| classify_transport(NAME, &e))?;

        // A reply may be split across several text blocks
        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(Error::provider(
                NAME,
                ProviderErrorKind::Network,
                "response contained no text content",
            ));
        }
        Ok(text)
    }
}
