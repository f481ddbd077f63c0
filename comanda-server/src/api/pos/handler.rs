//! Point-of-Sale API Handlers
//!
//! Thin wrappers over [`PadService`]; every validation lives in the pad and
//! the store boundary, so a rejected request is guaranteed not to have
//! touched persisted state.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::{CompletedOrder, HeldOrder, Ticket};

use crate::core::ServerState;
use crate::pos::{PadView, PaymentInput};
use crate::utils::AppResult;

#[derive(Debug, Deserialize, Validate)]
pub struct OpenPadRequest {
    #[validate(length(min = 1, message = "waiter name is required"))]
    pub waiter: String,
}

/// POST /api/pos/pads - open a fresh pad for a waiter/cashier
pub async fn open_pad(
    State(state): State<ServerState>,
    Json(payload): Json<OpenPadRequest>,
) -> AppResult<Json<PadView>> {
    payload.validate()?;
    Ok(Json(state.pads.open_pad(&payload.waiter)))
}

/// GET /api/pos/pads/:id
pub async fn get_pad(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.view(&id)?))
}

/// DELETE /api/pos/pads/:id
pub async fn close_pad(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.pads.close_pad(&id)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SelectTableRequest {
    #[validate(length(min = 1, message = "table number is required"))]
    pub number: String,
}

/// POST /api/pos/pads/:id/table - pick a table (Reserved/Cleaning rejected)
pub async fn select_table(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SelectTableRequest>,
) -> AppResult<Json<PadView>> {
    payload.validate()?;
    Ok(Json(state.pads.select_table(&id, &payload.number)?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1, message = "product id is required"))]
    pub product_id: String,
}

/// POST /api/pos/pads/:id/items - add one unit of a product
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<PadView>> {
    payload.validate()?;
    Ok(Json(state.pads.add_item(&id, &payload.product_id)?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// PUT /api/pos/pads/:id/items/:product_id - set quantity (<= 0 removes)
pub async fn update_quantity(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(String, String)>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<PadView>> {
    Ok(Json(
        state.pads.update_quantity(&id, &product_id, payload.quantity)?,
    ))
}

/// DELETE /api/pos/pads/:id/items/:product_id
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.remove_item(&id, &product_id)?))
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: Option<String>,
}

/// PUT /api/pos/pads/:id/items/:product_id/note
pub async fn set_item_note(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(String, String)>,
    Json(payload): Json<NoteRequest>,
) -> AppResult<Json<PadView>> {
    Ok(Json(
        state.pads.set_item_note(&id, &product_id, payload.note)?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: Option<String>,
}

/// PUT /api/pos/pads/:id/notes - kitchen notes for the whole comanda
pub async fn set_notes(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<NotesRequest>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.set_notes(&id, payload.notes)?))
}

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: Option<String>,
}

/// PUT /api/pos/pads/:id/customer
pub async fn set_customer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerRequest>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.set_customer_name(&id, payload.name)?))
}

/// POST /api/pos/pads/:id/send - send the comanda to the kitchen
///
/// Requires items and a selected table; violations are 400s and the store is
/// untouched.
pub async fn send(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Ticket>> {
    Ok(Json(state.pads.send(&id)?))
}

/// POST /api/pos/pads/:id/refresh - poll the store for kitchen progress
pub async fn refresh(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.refresh(&id)?))
}

/// POST /api/pos/pads/:id/served - mark the order served (requires READY)
pub async fn mark_served(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.mark_served(&id)?))
}

/// POST /api/pos/pads/:id/hold - suspend the draft
pub async fn hold(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.hold(&id)?))
}

/// POST /api/pos/pads/:id/recall - restore the most recently held order
pub async fn recall(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.recall(&id)?))
}

/// POST /api/pos/pads/:id/payment - take payment and finalize the order
pub async fn payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentInput>,
) -> AppResult<Json<CompletedOrder>> {
    Ok(Json(state.pads.process_payment(&id, &payload)?))
}

/// POST /api/pos/pads/:id/void - clear the current draft
pub async fn void(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PadView>> {
    Ok(Json(state.pads.void(&id)?))
}

/// GET /api/pos/held - all suspended orders, oldest first
pub async fn list_held(State(state): State<ServerState>) -> AppResult<Json<Vec<HeldOrder>>> {
    Ok(Json(state.store.list_held()?))
}

/// GET /api/pos/completed - all paid orders, oldest first
pub async fn list_completed(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<CompletedOrder>>> {
    Ok(Json(state.store.list_completed()?))
}
