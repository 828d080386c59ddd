use thiserror::Error;

/// Errors produced while reranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RerankError {
    /// Malformed arguments: negative `top_n`, non-finite scores, too many documents.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Reranker configuration is inconsistent.
    #[error("invalid rerank config: {0}")]
    InvalidConfig(String),
    /// The remote reranking provider failed or answered with something unusable.
    #[error("provider error: {0}")]
    Provider(String),
}

impl RerankError {
    /// Whether the caller is at fault (maps to a 4xx at the HTTP layer).
    pub fn is_client_error(&self) -> bool {
        matches!(self, RerankError::InvalidInput(_))
    }
}
