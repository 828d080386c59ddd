use serde::{Deserialize, Serialize};

use crate::RerankError;

/// Tuning knobs for [`HeuristicReranker`](crate::HeuristicReranker).
///
/// Serde-friendly so it can be embedded in the umbrella YAML config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RerankConfig {
    /// Half-width of the uniform score jitter. `0.0` disables it.
    #[serde(default = "RerankConfig::default_jitter_amplitude")]
    pub jitter_amplitude: f64,
    /// Fixed jitter seed for reproducible runs.
    #[serde(default)]
    pub jitter_seed: Option<u64>,
    /// Upper bound on candidates accepted per call.
    #[serde(default = "RerankConfig::default_max_documents")]
    pub max_documents: usize,
    /// Result count used when a request omits `topN`.
    #[serde(default = "RerankConfig::default_top_n")]
    pub default_top_n: usize,
    /// Replaces the built-in stop-word list when set.
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            jitter_amplitude: Self::default_jitter_amplitude(),
            jitter_seed: None,
            max_documents: Self::default_max_documents(),
            default_top_n: Self::default_top_n(),
            stop_words: None,
        }
    }
}

impl RerankConfig {
    pub(crate) fn default_jitter_amplitude() -> f64 {
        0.05
    }

    pub(crate) fn default_max_documents() -> usize {
        1_000
    }

    pub(crate) fn default_top_n() -> usize {
        3
    }

    /// Deterministic configuration: no jitter.
    pub fn deterministic() -> Self {
        Self {
            jitter_amplitude: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RerankError> {
        if !self.jitter_amplitude.is_finite() || !(0.0..=0.5).contains(&self.jitter_amplitude) {
            return Err(RerankError::InvalidConfig(
                "jitter_amplitude must be between 0.0 and 0.5".into(),
            ));
        }
        if self.max_documents == 0 {
            return Err(RerankError::InvalidConfig(
                "max_documents must be greater than zero".into(),
            ));
        }
        if let Some(words) = &self.stop_words {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(RerankError::InvalidConfig(
                    "stop_words must not contain blank entries".into(),
                ));
            }
        }
        Ok(())
    }
}
