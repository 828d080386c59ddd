//! simlab pseudo-embeddings
//!
//! This crate turns text into small, fixed-size vectors without any model.
//! Every word is hashed by summing its character codes and the hash drops
//! weight into two of 128 buckets. The result is L2-normalized so cosine
//! similarity reduces to a dot product.
//!
//! It is a teaching toy. Two sentences about the same topic will often score
//! low and two unrelated sentences can collide, because the buckets only see
//! character sums. What it does guarantee:
//!
//! - **Determinism** - same text, same bits, every time.
//! - **Case-insensitivity** - `"Hello"` and `"HELLO"` embed identically.
//! - **Unit length** - every non-empty input has norm 1.0; empty or
//!   whitespace-only input yields the all-zero vector.
//!
//! ## Quick example
//!
//! ```
//! use embedding::{compare_texts, embed, Interpretation};
//!
//! let a = embed("The cat sat on the mat");
//! assert_eq!(a.dimensions(), 128);
//!
//! let result = compare_texts("hello world", "HELLO WORLD");
//! assert_eq!(result.similarity, 1.0);
//! assert_eq!(result.interpretation, Interpretation::VerySimilar);
//! ```

pub mod error;
pub mod types;

mod normalize;
mod pseudo;
mod similarity;

pub use crate::error::EmbeddingError;
pub use crate::pseudo::{embed, embed_batch, word_hash};
pub use crate::similarity::{compare_texts, cosine, similarity};
pub use crate::types::{Embedding, Interpretation, SimilarityResult};

/// Number of buckets in every pseudo-embedding.
pub const EMBEDDING_DIM: usize = 128;
