use crate::config::PROVIDER_KEY_ENV;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rerank::{CandidateDocument, RankedDocument};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rerank request
#[derive(Debug, Deserialize)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<CandidateDocument>,
    /// Falls back to the configured default (3) when omitted.
    #[serde(default, rename = "topN")]
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RerankResponse {
    pub success: bool,
    pub simulated: bool,
    pub results: Vec<RankedDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_guide: Option<SetupGuide>,
}

#[derive(Debug, Serialize)]
pub struct RerankFailure {
    pub success: bool,
    pub error: String,
}

/// How to switch from the simulation to a hosted reranker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupGuide {
    pub message: &'static str,
    pub provider: &'static str,
    pub env_var: &'static str,
    pub steps: Vec<String>,
    pub docs: &'static str,
}

impl SetupGuide {
    fn cohere() -> Self {
        Self {
            message: "Showing simulated reranking. Configure a provider key for model-based scores.",
            provider: "Cohere",
            env_var: PROVIDER_KEY_ENV,
            steps: vec![
                "Create an API key at https://dashboard.cohere.com/api-keys".to_string(),
                format!("Export it as {PROVIDER_KEY_ENV} or set SIMLAB_SERVER__PROVIDER__API_KEY"),
                "Restart the server".to_string(),
            ],
            docs: "https://docs.cohere.com/reference/rerank",
        }
    }
}

fn failure(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(RerankFailure {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

/// Rerank documents for a query.
///
/// Uses the hosted provider when one is configured, otherwise the heuristic
/// simulation plus a setup guide. Provider failures are reported, never
/// silently replaced by the simulation.
pub async fn rerank_documents(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<RerankRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let top_n = request
        .top_n
        .unwrap_or(state.config.rerank.default_top_n as i64);
    let provider = state.reranker.as_ref();

    match simlab::rerank_documents(provider, &request.query, &request.documents, top_n).await {
        Ok(results) => {
            metrics::counter!(
                "simlab_rerank_total",
                "provider" => provider.name().to_string(),
                "outcome" => "ok"
            )
            .increment(1);

            let simulated = provider.is_simulated();
            Json(RerankResponse {
                success: true,
                simulated,
                results,
                setup_guide: simulated.then(SetupGuide::cohere),
            })
            .into_response()
        }
        Err(err) => {
            metrics::counter!(
                "simlab_rerank_total",
                "provider" => provider.name().to_string(),
                "outcome" => "error"
            )
            .increment(1);

            if err.is_invalid_input() {
                failure(StatusCode::BAD_REQUEST, err.to_string())
            } else {
                tracing::error!(provider = provider.name(), error = %err, "rerank failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}
