//! Reranking providers.
//!
//! The HTTP client speaks the Cohere-style `/rerank` shape:
//! request `{model, query, documents: [string], top_n}`, response
//! `{results: [{index, relevance_score}]}`. Transient failures are retried with
//! exponential backoff.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::retry::{execute_with_retry_async, is_retryable_status, AttemptError, RetryConfig};
use crate::{CandidateDocument, RankedDocument, RerankError};

// Shared client with connection pooling; per-request timeouts come from config.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(16)
        .build()
        .unwrap_or_default()
});

/// Anything that can rerank candidates for a query.
#[async_trait]
pub trait RerankProvider: Send + Sync {
    /// Short identifier for logs and responses.
    fn name(&self) -> &str;

    /// `true` for the offline heuristic.
    fn is_simulated(&self) -> bool;

    async fn rerank(
        &self,
        query: &str,
        documents: &[CandidateDocument],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, RerankError>;
}

/// Connection settings for a hosted reranker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Full endpoint URL, e.g. `https://api.cohere.com/v2/rerank`.
    #[serde(default = "ProviderConfig::default_api_url")]
    pub api_url: String,
    /// Bearer token. The provider is only used when this is set.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "ProviderConfig::default_model")]
    pub model: String,
    #[serde(default = "ProviderConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            api_key: None,
            model: Self::default_model(),
            timeout_secs: Self::default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl ProviderConfig {
    fn default_api_url() -> String {
        "https://api.cohere.com/v2/rerank".to_string()
    }

    fn default_model() -> String {
        "rerank-v3.5".to_string()
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    /// Whether a non-blank API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

/// Remote reranker over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRerankProvider {
    config: ProviderConfig,
}

impl HttpRerankProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, RerankError> {
        if !config.is_configured() {
            return Err(RerankError::InvalidConfig(
                "api_key is required for the http rerank provider".into(),
            ));
        }
        if config.api_url.trim().is_empty() {
            return Err(RerankError::InvalidConfig("api_url must not be empty".into()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// One POST to the endpoint. Network failures, 429 and 5xx are transient;
    /// any other non-success status is fatal.
    async fn send(&self, payload: &Value) -> Result<Value, AttemptError> {
        let mut request = HTTP_CLIENT
            .post(&self.config.api_url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(payload);
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            let message = format!("HTTP request failed: {e}");
            if e.is_builder() {
                AttemptError::Fatal(message)
            } else {
                AttemptError::Transient(message)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("HTTP error {status}: {body}");
            return Err(if is_retryable_status(status.as_u16()) {
                AttemptError::Transient(message)
            } else {
                AttemptError::Fatal(message)
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AttemptError::Fatal(format!("invalid JSON response: {e}")))
    }
}

#[async_trait]
impl RerankProvider for HttpRerankProvider {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn is_simulated(&self) -> bool {
        false
    }

    async fn rerank(
        &self,
        query: &str,
        documents: &[CandidateDocument],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, RerankError> {
        if documents.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let payload = build_payload(&self.config.model, query, documents, top_n);
        let result = execute_with_retry_async(&self.config.retry, |attempt| {
            let payload = &payload;
            async move {
                if attempt > 0 {
                    tracing::warn!(attempt, provider = %self.config.model, "retrying rerank request");
                }
                self.send(payload).await
            }
        })
        .await;

        let attempts = result.attempts;
        let response = result.into_result().map_err(RerankError::Provider)?;
        let ranked = parse_results(response, documents, top_n)?;
        tracing::debug!(attempts, returned = ranked.len(), "provider rerank complete");
        Ok(ranked)
    }
}

fn build_payload(model: &str, query: &str, documents: &[CandidateDocument], top_n: usize) -> Value {
    let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
    json!({
        "model": model,
        "query": query,
        "documents": texts,
        "top_n": top_n.min(documents.len()),
    })
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    results: Vec<ProviderHit>,
}

#[derive(Debug, Deserialize)]
struct ProviderHit {
    index: usize,
    relevance_score: f64,
}

/// Maps provider hits back onto the caller's documents, clamped and sorted.
fn parse_results(
    response: Value,
    documents: &[CandidateDocument],
    top_n: usize,
) -> Result<Vec<RankedDocument>, RerankError> {
    let parsed: ProviderResponse = serde_json::from_value(response)
        .map_err(|e| RerankError::Provider(format!("unsupported response shape: {e}")))?;

    let mut ranked = parsed
        .results
        .into_iter()
        .map(|hit| {
            let document = documents.get(hit.index).ok_or_else(|| {
                RerankError::Provider(format!(
                    "result index {} out of range for {} documents",
                    hit.index,
                    documents.len()
                ))
            })?;
            let score = if hit.relevance_score.is_finite() {
                hit.relevance_score.clamp(0.0, 1.0)
            } else {
                0.0
            };
            Ok(RankedDocument {
                document: document.clone(),
                rerank_score: score,
            })
        })
        .collect::<Result<Vec<_>, RerankError>>()?;

    ranked.sort_by(|a, b| b.rerank_score.total_cmp(&a.rerank_score));
    ranked.truncate(top_n);
    Ok(ranked)
}
