use crate::request_log::RequestLogEntry;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct RequestLogResponse {
    pub count: usize,
    pub capacity: usize,
    pub requests: Vec<RequestLogEntry>,
}

/// Recent API requests, newest first.
pub async fn list_requests(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let requests = state.request_log.recent();
    Json(RequestLogResponse {
        count: requests.len(),
        capacity: state.request_log.capacity(),
        requests,
    })
}

pub async fn clear_requests(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let cleared = state.request_log.clear();
    tracing::info!(cleared, "request log cleared");
    Json(json!({ "cleared": cleared }))
}
