use crate::{embed, EmbeddingError, Interpretation, SimilarityResult, EMBEDDING_DIM};

fn check_dimension(which: &str, v: &[f64]) -> Result<(), EmbeddingError> {
    if v.len() != EMBEDDING_DIM {
        return Err(EmbeddingError::dimension_mismatch(which, EMBEDDING_DIM, v.len()));
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn score(raw: f64) -> SimilarityResult {
    let clamped = raw.clamp(0.0, 1.0);
    let rounded = (clamped * 100.0).round() / 100.0;

    SimilarityResult {
        similarity: rounded,
        dimensions: EMBEDDING_DIM,
        interpretation: Interpretation::from_score(clamped),
    }
}

/// Raw dot product of two 128-value vectors, sign preserved.
///
/// Both inputs are expected to be L2-normalized already, so this is their
/// cosine similarity in [-1, 1].
pub fn cosine(a: &[f64], b: &[f64]) -> Result<f64, EmbeddingError> {
    check_dimension("left vector", a)?;
    check_dimension("right vector", b)?;
    Ok(dot(a, b))
}

/// Scores two embeddings for the similarity UI.
///
/// Negative cosine collapses to 0. The label is taken from the clamped score,
/// then the reported value is rounded to two decimals.
pub fn similarity(a: &[f64], b: &[f64]) -> Result<SimilarityResult, EmbeddingError> {
    cosine(a, b).map(score)
}

/// Embeds both texts and scores them. Cannot fail: embeddings always have the
/// right dimension.
pub fn compare_texts(text1: &str, text2: &str) -> SimilarityResult {
    let a = embed(text1);
    let b = embed(text2);
    score(dot(a.as_slice(), b.as_slice()))
}
