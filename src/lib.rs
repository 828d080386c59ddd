//! Workspace umbrella crate for simlab.
//!
//! Ties the pseudo-embedding scorer and the rerankers together behind a few
//! pipeline entry points, so callers (the HTTP server, the demo binary,
//! benches) go through one API and one metrics hook.

pub mod config;

pub use crate::config::{ConfigLoadError, SimlabConfig};
pub use embedding::{
    cosine, embed, embed_batch, similarity, word_hash, Embedding, EmbeddingError, Interpretation,
    SimilarityResult, EMBEDDING_DIM,
};
pub use rerank::{
    extract_keywords, validate_top_n, CandidateDocument, HeuristicReranker, HttpRerankProvider,
    JitterSource, NoJitter, ProviderConfig, RankedDocument, RerankConfig, RerankError,
    RerankProvider, RetryConfig, UniformJitter, STOP_WORDS,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// Errors surfaced by the pipeline entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("embedding failure: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("rerank failure: {0}")]
    Rerank(#[from] RerankError),
}

impl PipelineError {
    /// Whether the failure was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            PipelineError::Embedding(EmbeddingError::InvalidInput(_)) => true,
            PipelineError::Rerank(err) => err.is_client_error(),
        }
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_similarity(&self, latency: Duration, result: Result<f64, PipelineError>);
    fn record_rerank(&self, latency: Duration, provider: &str, result: Result<usize, PipelineError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_similarity(self, result: Result<f64, PipelineError>) {
        self.recorder.record_similarity(self.start.elapsed(), result);
    }

    fn record_rerank(self, provider: &str, result: Result<usize, PipelineError>) {
        self.recorder
            .record_rerank(self.start.elapsed(), provider, result);
    }
}

/// Embed a single text.
pub fn embed_text(text: &str) -> Embedding {
    embed(text)
}

/// Embed both texts and score them. Never fails for text input.
pub fn compare_texts(text1: &str, text2: &str) -> SimilarityResult {
    let span = MetricsSpan::start();
    let result = embedding::compare_texts(text1, text2);
    if let Some(span) = span {
        span.record_similarity(Ok(result.similarity));
    }
    result
}

/// Score two externally supplied vectors.
pub fn compare_embeddings(a: &[f64], b: &[f64]) -> Result<SimilarityResult, PipelineError> {
    let span = MetricsSpan::start();
    let result = similarity(a, b).map_err(PipelineError::from);
    if let Some(span) = span {
        span.record_similarity(result.as_ref().map(|r| r.similarity).map_err(|err| err.clone()));
    }
    result
}

/// Rerank `documents` for `query` with whichever provider is active.
///
/// `top_n` is the signed wire value; negative counts are rejected before the
/// provider is called.
pub async fn rerank_documents(
    provider: &dyn RerankProvider,
    query: &str,
    documents: &[CandidateDocument],
    top_n: i64,
) -> Result<Vec<RankedDocument>, PipelineError> {
    let span = MetricsSpan::start();
    let result = match validate_top_n(top_n) {
        Ok(top_n) => provider
            .rerank(query, documents, top_n)
            .await
            .map_err(PipelineError::from),
        Err(err) => Err(err.into()),
    };

    match &result {
        Ok(ranked) => tracing::debug!(
            provider = provider.name(),
            candidates = documents.len(),
            returned = ranked.len(),
            "rerank complete"
        ),
        Err(err) => tracing::warn!(provider = provider.name(), error = %err, "rerank failed"),
    }

    if let Some(span) = span {
        span.record_rerank(
            provider.name(),
            result.as_ref().map(Vec::len).map_err(|err| err.clone()),
        );
    }
    result
}

/// Pick the reranker for a configuration: the hosted provider when it has an
/// API key, the heuristic simulation otherwise.
pub fn build_reranker(
    rerank_cfg: &RerankConfig,
    provider_cfg: &ProviderConfig,
) -> Result<Arc<dyn RerankProvider>, RerankError> {
    if provider_cfg.is_configured() {
        tracing::info!(model = %provider_cfg.model, "using hosted rerank provider");
        Ok(Arc::new(HttpRerankProvider::new(provider_cfg.clone())?))
    } else {
        tracing::info!("no rerank provider key configured, using heuristic simulation");
        Ok(Arc::new(HeuristicReranker::new(rerank_cfg.clone())?))
    }
}
