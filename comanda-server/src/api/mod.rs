//! HTTP API
//!
//! One module per resource, each exposing a `router()` that nests its own
//! prefix. Handlers return `AppResult<Json<T>>` and rely on `AppError`'s
//! `IntoResponse` for error mapping.

pub mod health;
pub mod kitchen_orders;
pub mod pos;
pub mod products;
pub mod session;
pub mod tables;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full API router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(kitchen_orders::router())
        .merge(pos::router())
        .merge(products::router())
        .merge(session::router())
        .merge(tables::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
