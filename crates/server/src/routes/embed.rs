use crate::error::ServerResult;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f64>,
    pub dimensions: usize,
    pub magnitude: f64,
}

/// Return the pseudo-embedding of a text.
pub async fn embed_text(
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;

    let embedding = simlab::embed_text(&request.text);
    let response = EmbedResponse {
        dimensions: embedding.dimensions(),
        magnitude: embedding.magnitude(),
        embedding: embedding.into_values(),
    };

    metrics::counter!("simlab_embed_total").increment(1);
    Ok(Json(response))
}
