use serde::{Deserialize, Serialize};

use crate::RerankError;

/// A document offered for reranking. Never mutated by the reranker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDocument {
    pub id: i64,
    pub text: String,
    /// Free-form origin tag, e.g. `"wikipedia"`.
    #[serde(default)]
    pub source: String,
    /// Prior relevance from first-stage retrieval.
    #[serde(default)]
    pub initial_score: f64,
}

impl CandidateDocument {
    pub fn new(id: i64, text: impl Into<String>, source: impl Into<String>, initial_score: f64) -> Self {
        Self {
            id,
            text: text.into(),
            source: source.into(),
            initial_score,
        }
    }
}

/// A candidate plus its recomputed score. Serialized flat:
/// `{id, text, source, initialScore, rerankScore}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedDocument {
    #[serde(flatten)]
    pub document: CandidateDocument,
    /// Always within [0, 1].
    pub rerank_score: f64,
}

/// Converts a wire-level `topN` into a result count.
pub fn validate_top_n(top_n: i64) -> Result<usize, RerankError> {
    usize::try_from(top_n)
        .map_err(|_| RerankError::InvalidInput(format!("topN must be >= 0, got {top_n}")))
}
