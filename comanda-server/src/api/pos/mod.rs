//! Point-of-Sale API module
//!
//! Pad lifecycle (open, edit, send, hold/recall, payment) plus read-only
//! access to held and completed orders.

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/pads", post(handler::open_pad))
        .route(
            "/pads/{id}",
            get(handler::get_pad).delete(handler::close_pad),
        )
        .route("/pads/{id}/table", post(handler::select_table))
        .route("/pads/{id}/items", post(handler::add_item))
        .route(
            "/pads/{id}/items/{product_id}",
            put(handler::update_quantity).delete(handler::remove_item),
        )
        .route(
            "/pads/{id}/items/{product_id}/note",
            put(handler::set_item_note),
        )
        .route("/pads/{id}/notes", put(handler::set_notes))
        .route("/pads/{id}/customer", put(handler::set_customer))
        .route("/pads/{id}/send", post(handler::send))
        .route("/pads/{id}/refresh", post(handler::refresh))
        .route("/pads/{id}/served", post(handler::mark_served))
        .route("/pads/{id}/hold", post(handler::hold))
        .route("/pads/{id}/recall", post(handler::recall))
        .route("/pads/{id}/payment", post(handler::payment))
        .route("/pads/{id}/void", post(handler::void))
        .route("/held", get(handler::list_held))
        .route("/completed", get(handler::list_completed))
}
