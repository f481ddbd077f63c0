//! Session API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/session", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::current).delete(handler::logout))
        .route("/login", post(handler::login))
}
