//! YAML configuration file support for simlab.
//!
//! A single file configures the heuristic reranker and the optional hosted
//! provider. Missing sections fall back to their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "local demo"
//!
//! rerank:
//!   jitter_amplitude: 0.05
//!   jitter_seed: 42
//!   max_documents: 1000
//!   default_top_n: 3
//!
//! provider:
//!   api_url: "https://api.cohere.com/v2/rerank"
//!   model: "rerank-v3.5"
//!   timeout_secs: 30
//!   retry:
//!     max_retries: 2
//!     base_delay: 200
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rerank::{ProviderConfig, RerankConfig, RerankError, RerankProvider};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

impl From<RerankError> for ConfigLoadError {
    fn from(err: RerankError) -> Self {
        ConfigLoadError::Validation(err.to_string())
    }
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimlabConfig {
    /// Configuration format version
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rerank: RerankConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for SimlabConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            rerank: RerankConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl SimlabConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration from a string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SimlabConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        self.rerank.validate()?;

        if self.provider.api_url.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "provider.api_url must not be empty".to_string(),
            ));
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "provider.timeout_secs must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the reranker this configuration selects.
    pub fn reranker(&self) -> Result<Arc<dyn RerankProvider>, ConfigLoadError> {
        Ok(crate::build_reranker(&self.rerank, &self.provider)?)
    }
}
