//! # simlab Reranker (`rerank`)
//!
//! ## Purpose
//!
//! `rerank` reorders a small list of candidate documents for a query. Two
//! implementations share the same [`RerankProvider`] contract:
//!
//! - [`HeuristicReranker`] - the offline simulation. Keyword overlap plus a
//!   couple of hard-coded topic rules, a little jitter, clamped to [0, 1].
//! - [`HttpRerankProvider`] - delegates to a hosted `/rerank` endpoint when
//!   an API key is configured.
//!
//! ## Core Types
//!
//! - [`CandidateDocument`]: id, text, free-form source tag and a prior score.
//! - [`RankedDocument`]: the candidate plus its `rerankScore`.
//! - [`RerankConfig`]: jitter amplitude/seed and request limits.
//! - [`JitterSource`]: injectable randomness; [`NoJitter`] makes runs exact.
//!
//! ## Example Usage
//!
//! ```
//! use rerank::{CandidateDocument, HeuristicReranker, NoJitter, RerankConfig};
//!
//! let reranker = HeuristicReranker::with_jitter(RerankConfig::default(), NoJitter);
//! let docs = vec![
//!     CandidateDocument::new(1, "Deep learning is a subset of machine learning", "wiki", 0.5),
//!     CandidateDocument::new(2, "Tomorrow's weather forecast: sunny", "news", 0.5),
//! ];
//!
//! let ranked = reranker.rerank("machine learning", &docs, 2).unwrap();
//! assert_eq!(ranked[0].document.id, 1);
//! assert!(ranked[0].rerank_score > ranked[1].rerank_score);
//! ```

pub mod config;
pub mod error;
pub mod heuristic;
pub mod jitter;
pub mod keywords;
pub mod provider;
pub mod retry;
pub mod types;

mod serde_millis;

pub use crate::config::RerankConfig;
pub use crate::error::RerankError;
pub use crate::heuristic::HeuristicReranker;
pub use crate::jitter::{JitterSource, NoJitter, UniformJitter};
pub use crate::keywords::{extract_keywords, STOP_WORDS};
pub use crate::provider::{HttpRerankProvider, ProviderConfig, RerankProvider};
pub use crate::retry::RetryConfig;
pub use crate::types::{validate_top_n, CandidateDocument, RankedDocument};
