//! Kitchen Orders API module
//!
//! REST surface of the kitchen board: the polled view, per-ticket status
//! transitions, the bulk ready action and new-comanda notifications.

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen-orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/stats", get(handler::stats))
        .route("/notifications", get(handler::notifications))
        .route("/refresh", post(handler::refresh))
        .route("/ready-all", post(handler::ready_all))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::set_status))
}
