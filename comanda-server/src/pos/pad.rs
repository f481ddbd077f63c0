//! Order pad - the waiter's draft comanda
//!
//! Pure draft state: selecting a table, merging items, notes and totals.
//! Nothing here touches the store; [`super::PadService`] owns that boundary,
//! so a validation failure is guaranteed to be a no-op on persisted state.
//!
//! Producer-observed status: `Draft -> Sent` on send; `Preparing`/`Ready`
//! afterwards are read-only reflections picked up by the pad's own poll of
//! the store; `Served` requires `Ready` and is terminal here, unlocking
//! payment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{
    CompletedOrder, DiningTable, HeldOrder, PaymentMethod, PaymentRecord, Product, TableStatus,
    Ticket, TicketLine, TicketStatus,
};

/// IVA applied on top of the subtotal
pub const TAX_RATE: f64 = 0.21;

/// Producer-side order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PadStatus {
    #[default]
    Draft,
    Sent,
    Preparing,
    Ready,
    Served,
}

impl From<TicketStatus> for PadStatus {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Sent => PadStatus::Sent,
            TicketStatus::Preparing => PadStatus::Preparing,
            TicketStatus::Ready => PadStatus::Ready,
            TicketStatus::Served => PadStatus::Served,
        }
    }
}

/// Producer-side validation errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PosError {
    #[error("Order has no items")]
    EmptyOrder,

    #[error("No table selected")]
    NoTableSelected,

    #[error("Table {number} is not available ({status:?})")]
    TableNotAvailable {
        number: String,
        status: TableStatus,
    },

    #[error("Order must be ready before it can be marked as served (currently {status:?})")]
    NotReady { status: PadStatus },

    #[error("Cash received ({tendered:.2}) is less than the total ({total:.2})")]
    InsufficientCash { tendered: f64, total: f64 },

    #[error("Card number must have at least 4 digits")]
    InvalidCard,

    #[error("Pad not found: {0}")]
    PadNotFound(String),
}

pub type PosResult<T> = Result<T, PosError>;

/// Payment request from the cashier
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    /// Cash handed over (cash payments)
    pub tendered: Option<f64>,
    /// Full card number; only the last 4 digits are kept (card payments)
    pub card_number: Option<String>,
}

/// Round to cents
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Uppercase 3-letter area prefix for ticket ids ("Terraza" -> "TER")
fn area_prefix(area: &str) -> String {
    area.chars().take(3).flat_map(char::to_uppercase).collect()
}

/// The waiter's draft comanda
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderPad {
    /// Assigned on table selection (or first item for counter orders)
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
}

impl OrderPad {
    pub fn new(waiter: impl Into<String>) -> Self {
        Self {
            waiter: waiter.into(),
            ..Default::default()
        }
    }

    /// Pick a table for this comanda.
    ///
    /// Reserved and Cleaning tables are rejected. Selecting a table starts a
    /// fresh draft and assigns the area-prefixed order id.
    pub fn select_table(&mut self, table: &DiningTable, now: i64) -> PosResult<()> {
        if !table.status.is_selectable() {
            return Err(PosError::TableNotAvailable {
                number: table.number.clone(),
                status: table.status,
            });
        }

        self.table = Some(table.clone());
        self.status = PadStatus::Draft;
        self.order_id = Some(format!(
            "{}-{}-{}",
            area_prefix(&table.area),
            table.number,
            now
        ));
        Ok(())
    }

    /// Add one unit of a product, merging with an existing line
    pub fn add_item(&mut self, product: &Product, now: i64) {
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.items.push(TicketLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: 1,
                category: product.category,
                price: product.price,
                note: None,
            });
        }

        // Counter orders get an id on the first item
        if self.order_id.is_none() {
            self.order_id = Some(format!("ORD-{}", now));
        }
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line; an emptied pad forgets its order id
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|l| l.product_id != product_id);
        if self.items.is_empty() {
            self.order_id = None;
        }
    }

    pub fn set_item_note(&mut self, product_id: &str, note: Option<String>) {
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) {
            line.note = note;
        }
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub fn set_customer_name(&mut self, name: Option<String>) {
        self.customer_name = name;
    }

    // ========== Totals ==========

    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|l| l.price * l.quantity as f64)
            .sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * TAX_RATE
    }

    /// Subtotal plus IVA, rounded to cents
    pub fn total(&self) -> f64 {
        round2(self.subtotal() + self.tax())
    }

    // ========== Lifecycle ==========

    /// Build the kitchen ticket.
    ///
    /// Requires a non-empty item list and a selected table; either violation
    /// is a typed error and the pad is left untouched. On success the pad
    /// reflects `Sent` but keeps its items: the waiter may still add a
    /// second round.
    pub fn send_to_kitchen(&mut self, now: i64) -> PosResult<Ticket> {
        if self.items.is_empty() {
            return Err(PosError::EmptyOrder);
        }
        let table = self.table.as_ref().ok_or(PosError::NoTableSelected)?;

        let id = match &self.order_id {
            Some(id) => id.clone(),
            None => format!("{}-{}-{}", area_prefix(&table.area), table.number, now),
        };

        let ticket = Ticket {
            id,
            table: table.snapshot(),
            items: self.items.clone(),
            notes: self.notes.clone().filter(|n| !n.trim().is_empty()),
            customer_name: self.customer_name.clone(),
            waiter: self.waiter.clone(),
            status: TicketStatus::Sent,
            timestamp: now,
            started_at: None,
            updated_at: now,
        };

        self.status = PadStatus::Sent;
        Ok(ticket)
    }

    /// Reflect a consumer-driven status change picked up by polling
    pub fn reflect_status(&mut self, status: TicketStatus) {
        if self.status != PadStatus::Draft {
            self.status = status.into();
        }
    }

    /// Mark the order served. Only legal once the kitchen reported Ready.
    pub fn mark_served(&mut self) -> PosResult<()> {
        if self.status != PadStatus::Ready {
            return Err(PosError::NotReady {
                status: self.status,
            });
        }
        self.status = PadStatus::Served;
        Ok(())
    }

    /// Suspend the draft for later recall, clearing the pad
    pub fn hold(&mut self, now: i64) -> PosResult<HeldOrder> {
        if self.items.is_empty() {
            return Err(PosError::EmptyOrder);
        }

        let held = HeldOrder {
            id: self
                .order_id
                .clone()
                .unwrap_or_else(|| format!("ORD-{}", now)),
            items: std::mem::take(&mut self.items),
            table_number: self.table.as_ref().map(|t| t.number.clone()),
            customer_name: self.customer_name.take(),
            timestamp: now,
        };
        self.clear();
        Ok(held)
    }

    /// Restore a previously held order onto the pad
    pub fn recall(&mut self, held: HeldOrder) {
        self.order_id = Some(held.id);
        self.items = held.items;
        self.customer_name = held.customer_name;
        self.status = PadStatus::Draft;
    }

    /// Take payment and produce the completed-order record, clearing the pad
    pub fn process_payment(&mut self, input: &PaymentInput, now: i64) -> PosResult<CompletedOrder> {
        if self.items.is_empty() {
            return Err(PosError::EmptyOrder);
        }

        let total = self.total();
        let payment = match input.method {
            PaymentMethod::Cash => {
                let tendered = input.tendered.unwrap_or(0.0);
                if tendered < total {
                    return Err(PosError::InsufficientCash { tendered, total });
                }
                PaymentRecord {
                    payment_id: Uuid::new_v4().to_string(),
                    method: PaymentMethod::Cash,
                    amount: total,
                    tendered: Some(tendered),
                    change: Some(round2(tendered - total)),
                    card_last4: None,
                    timestamp: now,
                }
            }
            PaymentMethod::Card => {
                let digits: String = input
                    .card_number
                    .as_deref()
                    .unwrap_or("")
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                if digits.len() < 4 {
                    return Err(PosError::InvalidCard);
                }
                PaymentRecord {
                    payment_id: Uuid::new_v4().to_string(),
                    method: PaymentMethod::Card,
                    amount: total,
                    tendered: None,
                    change: None,
                    card_last4: Some(digits[digits.len() - 4..].to_string()),
                    timestamp: now,
                }
            }
        };

        let completed = CompletedOrder {
            id: self
                .order_id
                .clone()
                .unwrap_or_else(|| format!("ORD-{}", now)),
            items: self.items.clone(),
            table_number: self.table.as_ref().map(|t| t.number.clone()),
            customer_name: self.customer_name.clone(),
            payment,
            total,
            timestamp: now,
        };

        self.clear();
        Ok(completed)
    }

    /// Void the current transaction (draft only; the kitchen never sees it)
    pub fn void(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.order_id = None;
        self.items.clear();
        self.table = None;
        self.customer_name = None;
        self.notes = None;
        self.status = PadStatus::Draft;
    }
}
