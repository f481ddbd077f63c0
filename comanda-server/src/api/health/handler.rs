//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::store::StoreStats;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: String,
    pub store: StoreStats,
}

/// GET /api/health - liveness plus store counters
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let store = state.store.stats()?;
    Ok(Json(HealthResponse {
        status: "ok",
        environment: state.config.environment.clone(),
        store,
    }))
}
