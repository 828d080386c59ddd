use thiserror::Error;

/// Errors surfaced by the similarity scorer.
///
/// Embedding itself never fails; only callers handing in foreign vectors can
/// trip these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmbeddingError {
    /// Malformed arguments, e.g. a vector that is not 128 values long.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EmbeddingError {
    pub(crate) fn dimension_mismatch(which: &str, expected: usize, actual: usize) -> Self {
        EmbeddingError::InvalidInput(format!(
            "{which} has {actual} dimensions, expected {expected}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_input_message() {
        let err = EmbeddingError::InvalidInput("vector is empty".into());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("vector is empty"));
    }

    #[test]
    fn dimension_mismatch_names_both_sizes() {
        let err = EmbeddingError::dimension_mismatch("left vector", 128, 3);
        let msg = err.to_string();
        assert!(msg.contains("left vector"));
        assert!(msg.contains("128"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn error_debug_formatting() {
        let err = EmbeddingError::InvalidInput("x".into());
        assert!(format!("{err:?}").contains("InvalidInput"));
    }
}
