use crate::error::ServerResult;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Similarity request
#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub text1: String,
    pub text2: String,
}

/// Score two texts.
///
/// Responds with `{similarity, dimensions, interpretation}`; empty strings are
/// valid input and score 0.
pub async fn compare(
    payload: Result<Json<SimilarityRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;

    let result = simlab::compare_texts(&request.text1, &request.text2);

    metrics::counter!(
        "simlab_similarity_total",
        "interpretation" => result.interpretation.label()
    )
    .increment(1);
    metrics::histogram!("simlab_similarity_score").record(result.similarity);
    tracing::debug!(
        similarity = result.similarity,
        interpretation = %result.interpretation,
        "similarity computed"
    );

    Ok(Json(result))
}
