//! redb-based store for the order lifecycle
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `kitchen_orders` | ticket id | `Ticket` | Active kitchen tickets |
//! | `held_orders` | sequence (u64) | `HeldOrder` | Suspended drafts (stack) |
//! | `completed_orders` | payment id | `CompletedOrder` | Paid orders, for reporting |
//! | `session` | `"current"` | `Session` | Logged-in identity |
//! | `counters` | name | u64 | Held-order sequence |
//!
//! All values are JSON-encoded. The `kitchen_orders` table is keyed by
//! ticket id, so `append` is an upsert: exactly one ticket per id can exist
//! at any time.
//!
//! # Consistency
//!
//! `replace_all` overwrites the whole ticket table and is last-writer-wins:
//! two processes mutating concurrently will silently clobber each other.
//! That matches the observed contract of the system this store models; the
//! per-ticket `upsert_status` path narrows the window but does not close it.
//! Readers see staleness of up to one poll interval.

use std::path::Path;
use std::sync::Arc;

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};
use thiserror::Error;

use shared::models::{CompletedOrder, HeldOrder, Session, Ticket, TicketStatus, TransitionError};
use shared::util::now_millis;

/// Active kitchen tickets: key = ticket id, value = JSON-serialized Ticket
const KITCHEN_ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kitchen_orders");

/// Suspended drafts: key = push sequence, value = JSON-serialized HeldOrder
const HELD_ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("held_orders");

/// Paid orders: key = payment id, value = JSON-serialized CompletedOrder
const COMPLETED_ORDERS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("completed_orders");

/// Logged-in identity: key = "current", value = JSON-serialized Session
const SESSION_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

/// Monotonic counters: key = counter name, value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const SESSION_KEY: &str = "current";
const HELD_SEQ_KEY: &str = "held_seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("No held orders to recall")]
    NoHeldOrders,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Order lifecycle store backed by redb
#[derive(Clone)]
pub struct TicketStore {
    db: Arc<Database>,
}

impl TicketStore {
    /// Open or create the database at the given path.
    ///
    /// redb commits are durable as soon as `commit()` returns, so a power
    /// loss between a waiter's send and the kitchen's next poll cannot drop
    /// the ticket.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let _ = txn.open_table(KITCHEN_ORDERS_TABLE)?;
            let _ = txn.open_table(HELD_ORDERS_TABLE)?;
            let _ = txn.open_table(COMPLETED_ORDERS_TABLE)?;
            let _ = txn.open_table(SESSION_TABLE)?;
            let mut counters = txn.open_table(COUNTERS_TABLE)?;
            if counters.get(HELD_SEQ_KEY)?.is_none() {
                counters.insert(HELD_SEQ_KEY, 0u64)?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Kitchen Tickets ==========

    /// Validate a ticket at the store boundary.
    ///
    /// Callers are not trusted: a blank id, an empty item list, or a status
    /// other than Sent never reaches the table.
    fn validate_new_ticket(ticket: &Ticket) -> StoreResult<()> {
        if ticket.id.trim().is_empty() {
            return Err(StoreError::InvalidTicket("ticket id is blank".to_string()));
        }
        if ticket.items.is_empty() {
            return Err(StoreError::InvalidTicket(format!(
                "ticket {} has no items",
                ticket.id
            )));
        }
        if ticket.status != TicketStatus::Sent {
            return Err(StoreError::InvalidTicket(format!(
                "ticket {} must be appended with status SENT, got {}",
                ticket.id, ticket.status
            )));
        }
        Ok(())
    }

    /// Append a freshly sent ticket.
    ///
    /// Upserts by id: a colliding id replaces the stored ticket instead of
    /// creating a duplicate-looking entry.
    pub fn append(&self, ticket: &Ticket) -> StoreResult<()> {
        Self::validate_new_ticket(ticket)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KITCHEN_ORDERS_TABLE)?;
            let value = serde_json::to_vec(ticket)?;
            table.insert(ticket.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;

        tracing::info!(
            ticket_id = %ticket.id,
            table = %ticket.table.number,
            items = ticket.items.len(),
            "Ticket sent to kitchen"
        );
        Ok(())
    }

    /// Get a single ticket by id
    pub fn find(&self, id: &str) -> StoreResult<Option<Ticket>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(KITCHEN_ORDERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Full current sequence of tickets, oldest first.
    ///
    /// No filtering, no pagination; derived views are the consumer's job.
    pub fn list_all(&self) -> StoreResult<Vec<Ticket>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(KITCHEN_ORDERS_TABLE)?;

        let mut tickets = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let ticket: Ticket = serde_json::from_slice(value.value())?;
            tickets.push(ticket);
        }
        tickets.sort_by_key(|t| t.timestamp);
        Ok(tickets)
    }

    /// Overwrite the entire stored sequence.
    ///
    /// Last writer wins: no merge, no compare-and-swap. A concurrent writer
    /// whose read preceded this call loses its changes silently.
    pub fn replace_all(&self, tickets: &[Ticket]) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KITCHEN_ORDERS_TABLE)?;

            let existing: Vec<String> = table
                .iter()?
                .filter_map(|r| r.ok())
                .map(|(k, _)| k.value().to_string())
                .collect();
            for key in &existing {
                table.remove(key.as_str())?;
            }

            for ticket in tickets {
                let value = serde_json::to_vec(ticket)?;
                table.insert(ticket.id.as_str(), value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Apply a status transition to one ticket and persist it.
    ///
    /// Enforces the transition table ([`TicketStatus::can_transition`]),
    /// refreshes `updated_at`, and stamps `started_at` the first time the
    /// ticket enters Preparing. Returns the updated ticket.
    pub fn upsert_status(&self, id: &str, to: TicketStatus) -> StoreResult<Ticket> {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(KITCHEN_ORDERS_TABLE)?;

            let mut ticket: Ticket = match table.get(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StoreError::TicketNotFound(id.to_string())),
            };

            ticket.apply_status(to, now_millis())?;

            let value = serde_json::to_vec(&ticket)?;
            table.insert(id, value.as_slice())?;
            ticket
        };
        txn.commit()?;

        tracing::info!(
            ticket_id = %id,
            status = %updated.status,
            "Ticket status updated"
        );
        Ok(updated)
    }

    // ========== Held Orders ==========

    /// Suspend a draft order. Held orders form a stack: recall pops the most
    /// recently pushed one.
    pub fn push_held(&self, order: &HeldOrder) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut counters = txn.open_table(COUNTERS_TABLE)?;
            let seq = counters.get(HELD_SEQ_KEY)?.map(|g| g.value()).unwrap_or(0) + 1;
            counters.insert(HELD_SEQ_KEY, seq)?;
            drop(counters);

            let mut table = txn.open_table(HELD_ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            table.insert(seq, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Pop the most recently held order, removing it from the store
    pub fn recall_last(&self) -> StoreResult<HeldOrder> {
        let txn = self.db.begin_write()?;
        let order = {
            let mut table = txn.open_table(HELD_ORDERS_TABLE)?;

            let mut last: Option<(u64, HeldOrder)> = None;
            for result in table.iter()? {
                let (key, value) = result?;
                let order: HeldOrder = serde_json::from_slice(value.value())?;
                last = Some((key.value(), order));
            }

            let (seq, order) = last.ok_or(StoreError::NoHeldOrders)?;
            table.remove(seq)?;
            order
        };
        txn.commit()?;
        Ok(order)
    }

    /// All currently held orders, oldest first
    pub fn list_held(&self) -> StoreResult<Vec<HeldOrder>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(HELD_ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    // ========== Completed Orders ==========

    /// Record a paid order for reporting
    pub fn push_completed(&self, order: &CompletedOrder) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COMPLETED_ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            table.insert(order.payment.payment_id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// All completed orders, oldest first
    pub fn list_completed(&self) -> StoreResult<Vec<CompletedOrder>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(COMPLETED_ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: CompletedOrder = serde_json::from_slice(value.value())?;
            orders.push(order);
        }
        orders.sort_by_key(|o| o.timestamp);
        Ok(orders)
    }

    // ========== Session ==========

    /// Persist the logged-in identity
    pub fn save_session(&self, session: &Session) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SESSION_TABLE)?;
            let value = serde_json::to_vec(session)?;
            table.insert(SESSION_KEY, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Load the persisted identity, if any
    pub fn load_session(&self) -> StoreResult<Option<Session>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SESSION_TABLE)?;
        match table.get(SESSION_KEY)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Drop the persisted identity
    pub fn clear_session(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SESSION_TABLE)?;
            table.remove(SESSION_KEY)?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Statistics ==========

    /// Get storage statistics
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let txn = self.db.begin_read()?;
        let kitchen = txn.open_table(KITCHEN_ORDERS_TABLE)?;
        let held = txn.open_table(HELD_ORDERS_TABLE)?;
        let completed = txn.open_table(COMPLETED_ORDERS_TABLE)?;

        Ok(StoreStats {
            kitchen_tickets: kitchen.len()?,
            held_orders: held.len()?,
            completed_orders: completed.len()?,
        })
    }
}

/// Storage statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStats {
    pub kitchen_tickets: u64,
    pub held_orders: u64,
    pub completed_orders: u64,
}
