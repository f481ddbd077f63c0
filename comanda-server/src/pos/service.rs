//! Pad service - producer-side orchestration
//!
//! Owns the registry of open pads (one per POS client) and is the only
//! producer-side component that touches the [`TicketStore`]. Pad validation
//! runs before any store write, so a rejected send/hold/payment is a no-op
//! on persisted state.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use shared::models::{CompletedOrder, DiningTable, Ticket, TicketLine, TicketStatus};
use shared::util::now_millis;

use crate::pos::{Catalog, FloorPlan, OrderPad, PadStatus, PaymentInput, PosError};
use crate::store::TicketStore;
use crate::utils::{AppError, AppResult};

/// Serializable view of a pad, with derived totals
#[derive(Debug, Clone, Serialize)]
pub struct PadView {
    pub pad_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub items: Vec<TicketLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<DiningTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub waiter: String,
    pub status: PadStatus,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl PadView {
    fn from_pad(pad_id: &str, pad: &OrderPad) -> Self {
        Self {
            pad_id: pad_id.to_string(),
            order_id: pad.order_id.clone(),
            items: pad.items.clone(),
            table: pad.table.clone(),
            customer_name: pad.customer_name.clone(),
            notes: pad.notes.clone(),
            waiter: pad.waiter.clone(),
            status: pad.status,
            subtotal: pad.subtotal(),
            tax: pad.tax(),
            total: pad.total(),
        }
    }
}

/// Registry of open pads plus the producer's store boundary
pub struct PadService {
    pads: DashMap<String, OrderPad>,
    store: TicketStore,
    floor: Arc<FloorPlan>,
    catalog: Arc<Catalog>,
}

impl PadService {
    pub fn new(store: TicketStore, floor: Arc<FloorPlan>, catalog: Arc<Catalog>) -> Self {
        Self {
            pads: DashMap::new(),
            store,
            floor,
            catalog,
        }
    }

    /// Open a fresh pad for a waiter/cashier, returning its id
    pub fn open_pad(&self, waiter: &str) -> PadView {
        let pad_id = Uuid::new_v4().to_string();
        let pad = OrderPad::new(waiter);
        let view = PadView::from_pad(&pad_id, &pad);
        self.pads.insert(pad_id, pad);
        view
    }

    pub fn close_pad(&self, pad_id: &str) -> bool {
        self.pads.remove(pad_id).is_some()
    }

    pub fn view(&self, pad_id: &str) -> AppResult<PadView> {
        let pad = self.get(pad_id)?;
        Ok(PadView::from_pad(pad_id, &pad))
    }

    fn get(&self, pad_id: &str) -> AppResult<dashmap::mapref::one::Ref<'_, String, OrderPad>> {
        self.pads
            .get(pad_id)
            .ok_or_else(|| PosError::PadNotFound(pad_id.to_string()).into())
    }

    fn get_mut(
        &self,
        pad_id: &str,
    ) -> AppResult<dashmap::mapref::one::RefMut<'_, String, OrderPad>> {
        self.pads
            .get_mut(pad_id)
            .ok_or_else(|| PosError::PadNotFound(pad_id.to_string()).into())
    }

    // ========== Draft editing ==========

    pub fn select_table(&self, pad_id: &str, table_number: &str) -> AppResult<PadView> {
        let table = self
            .floor
            .find_by_number(table_number)
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_number)))?;

        let mut pad = self.get_mut(pad_id)?;
        pad.select_table(&table, now_millis())?;
        Ok(PadView::from_pad(pad_id, &pad))
    }

    pub fn add_item(&self, pad_id: &str, product_id: &str) -> AppResult<PadView> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", product_id)))?
            .clone();

        let mut pad = self.get_mut(pad_id)?;
        pad.add_item(&product, now_millis());
        Ok(PadView::from_pad(pad_id, &pad))
    }

    pub fn update_quantity(&self, pad_id: &str, product_id: &str, quantity: i32) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        pad.update_quantity(product_id, quantity);
        Ok(PadView::from_pad(pad_id, &pad))
    }

    pub fn remove_item(&self, pad_id: &str, product_id: &str) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        pad.remove_item(product_id);
        Ok(PadView::from_pad(pad_id, &pad))
    }

    pub fn set_item_note(&self, pad_id: &str, product_id: &str, note: Option<String>) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        pad.set_item_note(product_id, note);
        Ok(PadView::from_pad(pad_id, &pad))
    }

    pub fn set_notes(&self, pad_id: &str, notes: Option<String>) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        pad.set_notes(notes);
        Ok(PadView::from_pad(pad_id, &pad))
    }

    pub fn set_customer_name(&self, pad_id: &str, name: Option<String>) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        pad.set_customer_name(name);
        Ok(PadView::from_pad(pad_id, &pad))
    }

    // ========== Lifecycle ==========

    /// Send the comanda to the kitchen.
    ///
    /// Pad validation runs first; only a valid ticket reaches the store. If
    /// the store write fails the pad is rolled back to Draft.
    pub fn send(&self, pad_id: &str) -> AppResult<Ticket> {
        let mut pad = self.get_mut(pad_id)?;
        let ticket = pad.send_to_kitchen(now_millis())?;

        if let Err(e) = self.store.append(&ticket) {
            pad.status = PadStatus::Draft;
            return Err(e.into());
        }
        Ok(ticket)
    }

    /// Poll the store for consumer-driven status changes.
    ///
    /// This is the producer's only window into the kitchen: there is no push
    /// notification, so the view is stale up to one poll interval.
    pub fn refresh(&self, pad_id: &str) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        if let Some(order_id) = pad.order_id.clone()
            && let Some(ticket) = self.store.find(&order_id)?
        {
            pad.reflect_status(ticket.status);
        }
        Ok(PadView::from_pad(pad_id, &pad))
    }

    /// Mark the order served, writing the terminal transition through to the
    /// store so it drops off the active kitchen board.
    pub fn mark_served(&self, pad_id: &str) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        if pad.status != PadStatus::Ready {
            return Err(PosError::NotReady { status: pad.status }.into());
        }

        if let Some(order_id) = pad.order_id.clone() {
            self.store.upsert_status(&order_id, TicketStatus::Served)?;
        }
        pad.mark_served()?;
        Ok(PadView::from_pad(pad_id, &pad))
    }

    /// Suspend the pad's draft into the held-order stack
    pub fn hold(&self, pad_id: &str) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        let held = pad.hold(now_millis())?;

        if let Err(e) = self.store.push_held(&held) {
            // Restore the draft so nothing is lost
            pad.recall(held);
            return Err(e.into());
        }
        Ok(PadView::from_pad(pad_id, &pad))
    }

    /// Recall the most recently held order onto the pad
    pub fn recall(&self, pad_id: &str) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        let held = self.store.recall_last()?;
        pad.recall(held);
        Ok(PadView::from_pad(pad_id, &pad))
    }

    /// Take payment, persist the completed order and clear the pad
    pub fn process_payment(&self, pad_id: &str, input: &PaymentInput) -> AppResult<CompletedOrder> {
        let mut pad = self.get_mut(pad_id)?;
        let completed = pad.process_payment(input, now_millis())?;
        self.store.push_completed(&completed)?;

        tracing::info!(
            order_id = %completed.id,
            total = completed.total,
            method = ?completed.payment.method,
            "Payment processed"
        );
        Ok(completed)
    }

    /// Void the current transaction
    pub fn void(&self, pad_id: &str) -> AppResult<PadView> {
        let mut pad = self.get_mut(pad_id)?;
        pad.void();
        Ok(PadView::from_pad(pad_id, &pad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PadService {
        PadService::new(
            TicketStore::open_in_memory().unwrap(),
            Arc::new(FloorPlan::seeded()),
            Arc::new(Catalog::seeded()),
        )
    }

    #[test]
    fn test_send_happy_path() {
        let svc = service();
        let pad = svc.open_pad("María García");

        svc.select_table(&pad.pad_id, "5").unwrap();
        svc.add_item(&pad.pad_id, "main1").unwrap();
        svc.add_item(&pad.pad_id, "main1").unwrap();

        let ticket = svc.send(&pad.pad_id).unwrap();
        assert_eq!(ticket.status, TicketStatus::Sent);
        assert_eq!(ticket.items.len(), 1);
        assert_eq!(ticket.items[0].quantity, 2);

        let stored = svc.store.list_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, ticket.id);
    }

    #[test]
    fn test_send_without_items_leaves_store_untouched() {
        let svc = service();
        let pad = svc.open_pad("María García");
        svc.select_table(&pad.pad_id, "1").unwrap();

        let err = svc.send(&pad.pad_id).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(svc.store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_refresh_reflects_kitchen_progress() {
        let svc = service();
        let pad = svc.open_pad("María García");
        svc.select_table(&pad.pad_id, "1").unwrap();
        svc.add_item(&pad.pad_id, "app1").unwrap();
        let ticket = svc.send(&pad.pad_id).unwrap();

        // Kitchen picks it up behind the producer's back
        svc.store
            .upsert_status(&ticket.id, TicketStatus::Preparing)
            .unwrap();

        // Nothing changes until the producer polls
        assert_eq!(svc.view(&pad.pad_id).unwrap().status, PadStatus::Sent);
        let view = svc.refresh(&pad.pad_id).unwrap();
        assert_eq!(view.status, PadStatus::Preparing);
    }

    #[test]
    fn test_mark_served_writes_through() {
        let svc = service();
        let pad = svc.open_pad("María García");
        svc.select_table(&pad.pad_id, "1").unwrap();
        svc.add_item(&pad.pad_id, "app1").unwrap();
        let ticket = svc.send(&pad.pad_id).unwrap();

        svc.store
            .upsert_status(&ticket.id, TicketStatus::Preparing)
            .unwrap();
        svc.store
            .upsert_status(&ticket.id, TicketStatus::Ready)
            .unwrap();

        // Not legal until the pad has seen Ready
        assert!(svc.mark_served(&pad.pad_id).is_err());

        svc.refresh(&pad.pad_id).unwrap();
        let view = svc.mark_served(&pad.pad_id).unwrap();
        assert_eq!(view.status, PadStatus::Served);

        let stored = svc.store.find(&ticket.id).unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::Served);
    }

    #[test]
    fn test_hold_and_recall_roundtrip() {
        let svc = service();
        let pad = svc.open_pad("Juan Cajero");
        svc.add_item(&pad.pad_id, "bev2").unwrap();

        let view = svc.hold(&pad.pad_id).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(svc.store.list_held().unwrap().len(), 1);

        let view = svc.recall(&pad.pad_id).unwrap();
        assert_eq!(view.items.len(), 1);
        assert!(svc.store.list_held().unwrap().is_empty());

        // Nothing left to recall
        assert!(matches!(
            svc.recall(&pad.pad_id).unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_payment_persists_completed_order() {
        let svc = service();
        let pad = svc.open_pad("Juan Cajero");
        svc.add_item(&pad.pad_id, "main1").unwrap();

        let input = PaymentInput {
            method: shared::models::PaymentMethod::Cash,
            tendered: Some(30.0),
            card_number: None,
        };
        let completed = svc.process_payment(&pad.pad_id, &input).unwrap();
        assert_eq!(completed.total, 21.78);

        let stored = svc.store.list_completed().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, completed.id);

        // Pad cleared for the next customer
        assert!(svc.view(&pad.pad_id).unwrap().items.is_empty());
    }

    #[test]
    fn test_unknown_pad_and_product() {
        let svc = service();
        assert!(matches!(
            svc.view("missing").unwrap_err(),
            AppError::NotFound(_)
        ));

        let pad = svc.open_pad("María García");
        assert!(matches!(
            svc.add_item(&pad.pad_id, "nope").unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
