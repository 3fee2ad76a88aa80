//! Liveness and readiness endpoints:
//!   GET /health - always ok while the process serves
//!   GET /ready  - analyzer details; the analyzer is built before binding

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub lexicon_entries: usize,
    pub policy: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let lemmatizer = &state.lemmatizer;
    Json(ReadyResponse {
        ready: true,
        lexicon_entries: lemmatizer.analyzer().entry_count(),
        policy: lemmatizer.policy_name().to_string(),
    })
}
