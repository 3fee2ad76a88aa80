//! POST /lemmatize - one lemma per token, optionally with analysis details.

use axum::{extract::State, Json};

use super::AppState;
use crate::error::AppError;
use crate::pipeline::{LemmaRequest, LemmaResponse};

/// Analysis is CPU-bound, so the pipeline runs on the blocking pool.
pub async fn lemmatize(
    State(state): State<AppState>,
    Json(req): Json<LemmaRequest>,
) -> Result<Json<LemmaResponse>, AppError> {
    let lemmatizer = state.lemmatizer.clone();
    let resp = tokio::task::spawn_blocking(move || lemmatizer.lemmatize(&req)).await??;
    Ok(Json(resp))
}
