//! API route handlers
//!
//! - `health`: liveness, readiness and Prometheus metrics
//! - `similarity`: text similarity scoring
//! - `embed`: raw pseudo-embeddings
//! - `rerank`: document reranking with simulated fallback
//! - `devtools`: recent request log

pub mod devtools;
pub mod embed;
pub mod health;
pub mod rerank;
pub mod similarity;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "simlab",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "simlab",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/similarity",
            "POST /api/embed",
            "POST /api/rerank",
            "GET /api/devtools/requests",
            "DELETE /api/devtools/requests",
            "GET /health",
            "GET /ready",
            "GET /metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
