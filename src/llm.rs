//! LLM orchestration: prompt, send, parse, with one retry and a deadline.

use crate::config::ConfigStore;
use crate::error::{Error, Result};
use crate::llm_providers::{ProviderClient, client_for};
use crate::parser::ResponseParser;
use crate::prompt::{analysis_prompt, enhancement_prompt};
use crate::providers::ProviderConfig;
use crate::types::{EnhancementBatch, EnhancementResult, StrategyAnalysis};
use crate::{log_debug, log_warn};

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::Instrument;

const ANALYZE_OP: &str = "strategy analysis";
const ENHANCE_OP: &str = "enhancement generation";

/// Most enhancement variants a single request may ask for
pub const MAX_ENHANCEMENTS: usize = 10;

/// How transient failures are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause before each retry
    pub backoff: Duration,
    /// Retries after the first attempt
    pub max_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_millis(crate::config::DEFAULT_BACKOFF_MS),
            max_retries: 1,
        }
    }
}

/// Composes prompt building, provider dispatch and response parsing.
///
/// Built once from a [`ConfigStore`] and shared across calls; it holds no
/// mutable state, so concurrent calls need no coordination.
pub struct LlmOrchestrator {
    config: ProviderConfig,
    client: Arc<dyn ProviderClient>,
    parser: ResponseParser,
    retry: RetryPolicy,
}

impl LlmOrchestrator {
    /// Build an orchestrator for the provider selected in `store`
    pub fn new(store: &dyn ConfigStore) -> Result<Self> {
        let config = store.provider_config()?;
        log_debug!(
            "Orchestrator using provider {} with model {}",
            config.provider,
            config.effective_model()
        );
        let client = client_for(config.provider);
        let retry = RetryPolicy {
            backoff: store.retry_backoff(),
            ..RetryPolicy::default()
        };
        Ok(Self::with_client(config, client).with_retry_policy(retry))
    }

    /// Build an orchestrator around an explicit backend
    pub fn with_client(config: ProviderConfig, client: Arc<dyn ProviderClient>) -> Self {
        Self {
            config,
            client,
            parser: ResponseParser::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Ask the provider for a structured analysis of `script`
    pub async fn analyze_strategy(&self, script: &str) -> Result<StrategyAnalysis> {
        let prompt = analysis_prompt(script);
        self.run(ANALYZE_OP, || self.attempt_analysis(&prompt)).await
    }

    /// Ask the provider for up to `count` improved versions of `script`.
    ///
    /// Fewer variants than requested is not an error; the batch carries a
    /// [`crate::types::CountMismatch`] warning instead.
    pub async fn generate_enhancements(
        &self,
        prior_analysis_json: &str,
        script: &str,
        count: usize,
    ) -> Result<EnhancementBatch> {
        if !(1..=MAX_ENHANCEMENTS).contains(&count) {
            return Err(Error::Config(format!(
                "enhancement count must be between 1 and {MAX_ENHANCEMENTS}, got {count}"
            )));
        }

        let prompt = enhancement_prompt(prior_analysis_json, script, count);
        let variants = self
            .run(ENHANCE_OP, || self.attempt_enhancements(&prompt, count))
            .await?;

        let batch = EnhancementBatch::new(variants, count);
        if let Some(warning) = &batch.warning {
            log_warn!("Enhancement shortfall from {}: {}", self.client.name(), warning);
        }
        Ok(batch)
    }

    /// Analyze `script`, then generate enhancements from that analysis
    pub async fn enhance_strategy(
        &self,
        script: &str,
        count: usize,
    ) -> Result<(StrategyAnalysis, EnhancementBatch)> {
        let analysis = self.analyze_strategy(script).await?;
        let analysis_json = serde_json::to_string_pretty(&analysis)
            .map_err(|e| Error::Config(format!("failed to serialize analysis: {e}")))?;
        let batch = self
            .generate_enhancements(&analysis_json, script, count)
            .await?;
        Ok((analysis, batch))
    }

    async fn attempt_analysis(&self, prompt: &str) -> Result<StrategyAnalysis> {
        let raw = self.send(ANALYZE_OP, prompt).await?;
        self.parser.parse_analysis(&raw)
    }

    async fn attempt_enhancements(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<EnhancementResult>> {
        let raw = self.send(ENHANCE_OP, prompt).await?;
        self.parser.parse_enhancements(&raw, count)
    }

    async fn send(&self, operation: &str, prompt: &str) -> Result<String> {
        log_debug!("Sending {} request to {}", operation, self.client.name());
        let raw = self.client.send(prompt, &self.config).await?;
        log_debug!("Received {} chars from {}", raw.len(), self.client.name());
        Ok(raw)
    }

    /// Run `action` under the retry policy, all inside the per-call deadline.
    ///
    /// Hitting the deadline drops the pending attempt, which cancels any
    /// in-flight request.
    async fn run<T, A, Fut>(&self, operation: &'static str, mut action: A) -> Result<T>
    where
        A: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let strategy = FixedInterval::new(self.retry.backoff).take(self.retry.max_retries);
        let provider = self.client.name();
        let max_attempts = self.retry.max_retries + 1;
        let span = tracing::debug_span!("llm_call", operation, provider);

        let mut attempt = 0usize;
        let attempts = RetryIf::spawn(
            strategy,
            move || {
                attempt += 1;
                let current = attempt;
                let pending = action();
                async move {
                    let result = pending.await;
                    if let Err(e) = &result {
                        if will_retry(current, max_attempts, e) {
                            log_warn!(
                                "{} via {} attempt {} failed, retrying: {}",
                                operation,
                                provider,
                                current,
                                e
                            );
                        } else {
                            log_debug!(
                                "{} via {} failed after {} attempt(s): {}",
                                operation,
                                provider,
                                current,
                                e
                            );
                        }
                    }
                    result
                }
            },
            Error::is_retryable,
        );

        match tokio::time::timeout(self.config.deadline(), attempts)
            .instrument(span)
            .await
        {
            Ok(Ok(value)) => {
                log_debug!("{} completed in {:?}", operation, started.elapsed());
                Ok(value)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                log_warn!("{} exceeded its {}ms deadline", operation, self.config.timeout_ms);
                Err(Error::Timeout {
                    operation,
                    elapsed_ms,
                })
            }
        }
    }
}

/// Whether a failed attempt will be followed by another one
fn will_retry(attempt: usize, max_attempts: usize, error: &Error) -> bool {
    attempt < max_attempts && error.is_retryable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::providers::Provider;

    #[test]
    fn test_new_rejects_missing_credentials() {
        let config = ProviderConfig::with_defaults(Provider::OpenAI);
        assert!(matches!(
            LlmOrchestrator::new(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_new_takes_backoff_from_store() {
        let config = Config::from_toml_str("provider = \"mock\"\n[retry]\nbackoff_ms = 5")
            .expect("config should parse");
        let orchestrator = LlmOrchestrator::new(&config).expect("mock config is valid");
        assert_eq!(orchestrator.retry_policy().backoff, Duration::from_millis(5));
        assert_eq!(orchestrator.retry_policy().max_retries, 1);
    }

    #[test]
    fn test_will_retry_only_within_budget() {
        let network = Error::Provider {
            provider: "mock".to_string(),
            kind: crate::error::ProviderErrorKind::Network,
            message: "reset".to_string(),
        };
        let auth = Error::Provider {
            provider: "mock".to_string(),
            kind: crate::error::ProviderErrorKind::Auth,
            message: "401".to_string(),
        };
        assert!(will_retry(1, 2, &network));
        assert!(!will_retry(2, 2, &network));
        assert!(!will_retry(1, 2, &auth));
    }

    #[tokio::test]
    async fn test_zero_count_rejected_before_sending() {
        let orchestrator =
            LlmOrchestrator::new(&ProviderConfig::mock()).expect("mock config is valid");
        let result = orchestrator.generate_enhancements("{}", "plot(close)", 0).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_oversized_count_rejected_before_sending() {
        let orchestrator =
            LlmOrchestrator::new(&ProviderConfig::mock()).expect("mock config is valid");
        let result = orchestrator
            .generate_enhancements("{}", "plot(close)", MAX_ENHANCEMENTS + 1)
            .await;
        assert!(matches!(result, Err(Error::Config(_))));
        let result = orchestrator
            .generate_enhancements("{}", "plot(close)", MAX_ENHANCEMENTS)
            .await
            .expect("the cap itself is allowed");
        assert_eq!(result.len(), MAX_ENHANCEMENTS);
    }

    #[tokio::test]
    async fn test_mock_end_to_end() {
        let orchestrator =
            LlmOrchestrator::new(&ProviderConfig::mock()).expect("mock config is valid");
        let (analysis, batch) = orchestrator
            .enhance_strategy("plot(close)", 2)
            .await
            .expect("mock flow should succeed");
        assert!(!analysis.risk.recommendations.is_empty());
        assert_eq!(batch.len(), 2);
        assert!(batch.warning.is_none());
    }
}
