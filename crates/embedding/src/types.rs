use serde::{Deserialize, Serialize};

use crate::{EmbeddingError, EMBEDDING_DIM};

/// A 128-bucket pseudo-embedding.
///
/// Built by [`embed`](crate::embed) or validated through
/// [`Embedding::from_values`]; the length invariant holds for every instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Embedding {
    values: Vec<f64>,
}

impl Embedding {
    pub(crate) fn new_unchecked(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), EMBEDDING_DIM);
        Self { values }
    }

    /// Wrap externally produced values, rejecting anything that is not 128 long.
    pub fn from_values(values: Vec<f64>) -> Result<Self, EmbeddingError> {
        if values.len() != EMBEDDING_DIM {
            return Err(EmbeddingError::dimension_mismatch(
                "embedding",
                EMBEDDING_DIM,
                values.len(),
            ));
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Euclidean norm. 1.0 for non-empty input, 0.0 for the zero vector.
    pub fn magnitude(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

impl TryFrom<Vec<f64>> for Embedding {
    type Error = EmbeddingError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Embedding::from_values(values)
    }
}

impl From<Embedding> for Vec<f64> {
    fn from(embedding: Embedding) -> Self {
        embedding.values
    }
}

impl AsRef<[f64]> for Embedding {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Qualitative label attached to a similarity score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Interpretation {
    #[serde(rename = "Very similar")]
    VerySimilar,
    #[serde(rename = "Somewhat similar")]
    SomewhatSimilar,
    #[serde(rename = "Slightly related")]
    SlightlyRelated,
    #[serde(rename = "Different topics")]
    DifferentTopics,
}

impl Interpretation {
    /// Thresholds are strict: exactly 0.8 is still "Somewhat similar".
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Interpretation::VerySimilar
        } else if score > 0.6 {
            Interpretation::SomewhatSimilar
        } else if score > 0.4 {
            Interpretation::SlightlyRelated
        } else {
            Interpretation::DifferentTopics
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::VerySimilar => "Very similar",
            Interpretation::SomewhatSimilar => "Somewhat similar",
            Interpretation::SlightlyRelated => "Slightly related",
            Interpretation::DifferentTopics => "Different topics",
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the similarity scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityResult {
    /// Clamped to [0, 1] and rounded to two decimals.
    pub similarity: f64,
    pub dimensions: usize,
    pub interpretation: Interpretation,
}
