use super::{MAX_OUTPUT_TOKENS, ProviderClient, classify_status, classify_transport, http_client};
use crate::error::{Error, ProviderErrorKind, Result};
use crate::log_debug;
use crate::providers::ProviderConfig;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const NAME: &str = "openai";

/// `OpenAI` Chat Completions backend
pub struct OpenAIProvider {
    client: Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAIProvider {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for OpenAIProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send(&self, prompt: &str, config: &ProviderConfig) -> Result<String> {
        let request_body = json!({
            "model": config.effective_model(),
            "max_completion_tokens": MAX_OUTPUT_TOKENS,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        log_debug!("Sending {} chars to {}", prompt.len(), API_URL);
        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_transport(NAME, &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(NAME, status, &text));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| classify_transport(NAME, &e))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                Error::provider(
                    NAME,
                    ProviderErrorKind::Network,
                    "response contained no message content",
                )
            })
    }
}
