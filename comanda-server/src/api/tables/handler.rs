//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::{DiningTable, TableStatus};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/tables - the whole floor plan
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(state.floor.list()))
}

/// GET /api/tables/:number - one table
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = state
        .floor
        .find_by_number(&number)
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", number)))?;
    Ok(Json(table))
}

#[derive(Debug, Deserialize)]
pub struct SetTableStatusRequest {
    pub status: TableStatus,
}

/// PUT /api/tables/:number/status - change occupancy status
pub async fn set_status(
    State(state): State<ServerState>,
    Path(number): Path<String>,
    Json(payload): Json<SetTableStatusRequest>,
) -> AppResult<Json<DiningTable>> {
    if !state.floor.set_status(&number, payload.status) {
        return Err(AppError::not_found(format!("Table {} not found", number)));
    }
    let table = state
        .floor
        .find_by_number(&number)
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", number)))?;
    Ok(Json(table))
}
