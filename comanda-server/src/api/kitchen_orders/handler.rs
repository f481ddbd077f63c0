//! Kitchen Orders API Handlers
//!
//! All reads serve the board's cached view, which the background poller
//! rebuilds on its fixed interval. A comanda sent after the last tick is not
//! visible here until the next one; `POST /refresh` is the staff-facing
//! manual override.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Ticket, TicketStatus};

use crate::core::ServerState;
use crate::kitchen::{BoardEntry, BoardNotification, BoardStats};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to one status; omitted means the active board (everything
    /// except SERVED)
    pub status: Option<TicketStatus>,
}

/// GET /api/kitchen-orders - the board view
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<BoardEntry>>> {
    let entries = match query.status {
        Some(status) => state.board.entries_with_status(status),
        None => state.board.entries(),
    };
    Ok(Json(entries))
}

/// GET /api/kitchen-orders/stats - per-status counts
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<BoardStats>> {
    Ok(Json(state.board.stats()))
}

/// GET /api/kitchen-orders/notifications - comandas sent within the last
/// minute and not yet picked up
pub async fn notifications(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<BoardNotification>>> {
    Ok(Json(state.board.notifications()))
}

/// POST /api/kitchen-orders/refresh - rebuild the view now instead of
/// waiting for the next poll tick
pub async fn refresh(State(state): State<ServerState>) -> AppResult<Json<Vec<BoardEntry>>> {
    state.board.refresh()?;
    Ok(Json(state.board.entries()))
}

/// GET /api/kitchen-orders/:id - one ticket with derived fields
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BoardEntry>> {
    let entry = state
        .board
        .find_or_load(&id)?
        .ok_or_else(|| AppError::not_found(format!("Ticket {} not found", id)))?;
    Ok(Json(entry))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: TicketStatus,
}

/// PUT /api/kitchen-orders/:id/status - advance (or revert) one ticket
///
/// Illegal transitions come back as 422 with the offending edge.
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<Ticket>> {
    let updated = state.board.set_status(&id, payload.status)?;
    Ok(Json(updated))
}

/// POST /api/kitchen-orders/ready-all - move every preparing ticket to READY
pub async fn ready_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Ticket>>> {
    let updated = state.board.mark_all_ready()?;
    tracing::info!(count = updated.len(), "Bulk ready applied");
    Ok(Json(updated))
}
