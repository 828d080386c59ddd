//! simlab Server - HTTP JSON API for pseudo-embedding similarity and reranking
//!
//! This crate exposes the `simlab` pipeline over axum:
//!
//! - **Similarity**: score two texts with the 128-bucket pseudo-embedding
//! - **Embeddings**: return the raw vector for a text
//! - **Reranking**: reorder candidate documents, through a hosted provider
//!   when an API key is configured and the heuristic simulation otherwise
//! - **Devtools**: a bounded log of the most recent API requests
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/similarity` - `{text1, text2}` to `{similarity, dimensions, interpretation}`
//! - `POST /api/embed` - `{text}` to `{embedding, dimensions, magnitude}`
//! - `POST /api/rerank` - `{query, documents, topN}` to `{success, simulated, results, setupGuide?}`
//! - `GET /api/devtools/requests` - recent requests, newest first
//! - `DELETE /api/devtools/requests` - clear the request log

pub mod config;
pub mod error;
pub mod middleware;
pub mod request_log;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use request_log::{RequestLog, RequestLogEntry};
pub use server::{build_router, start_server};
pub use state::ServerState;
