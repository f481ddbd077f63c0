//! Kitchen board - polled view and status mutations
//!
//! The board keeps a cached snapshot of the store, rebuilt on every poll
//! tick. Staff actions go through the store's `upsert_status` and patch the
//! cached entry in place, so the acting cook sees the change immediately
//! while everyone else catches up on their next tick.

use parking_lot::RwLock;
use serde::Serialize;

use shared::models::{Priority, Ticket, TicketLine, TicketStatus};
use shared::util::now_millis;

use crate::store::{StoreResult, TicketStore};

/// Floor for the prep estimate, in minutes
pub const MIN_PREP_MINUTES: i64 = 5;

/// A ticket still SENT and younger than this counts as a new-comanda
/// notification
pub const NEW_TICKET_WINDOW_MILLIS: i64 = 60_000;

/// Estimated preparation time for a ticket's items.
///
/// The per-category constant applies once per line; `quantity` does not
/// scale it. Two units of paella on one line estimate the same as one.
pub fn estimate_prep_minutes(items: &[TicketLine]) -> i64 {
    let total: i64 = items.iter().map(|l| l.category.prep_minutes()).sum();
    total.max(MIN_PREP_MINUTES)
}

/// One ticket as displayed on the board, with derived fields
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Estimated prep time in minutes
    pub estimated_minutes: i64,
    /// Minutes since prep started; 0 if not yet started
    pub elapsed_minutes: i64,
    /// Minutes since the ticket was sent
    pub wait_minutes: i64,
    pub priority: Priority,
}

impl BoardEntry {
    fn derive(ticket: Ticket, now: i64) -> Self {
        let estimated_minutes = estimate_prep_minutes(&ticket.items);
        let elapsed_minutes = ticket.elapsed_minutes(now);
        let wait_minutes = ticket.wait_minutes(now);
        let priority = ticket.priority(now);
        Self {
            ticket,
            estimated_minutes,
            elapsed_minutes,
            wait_minutes,
            priority,
        }
    }
}

/// Per-status counts shown in the board header
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BoardStats {
    pub sent: usize,
    pub preparing: usize,
    pub ready: usize,
}

/// New-comanda notification derived on refresh
#[derive(Debug, Clone, Serialize)]
pub struct BoardNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub priority: Priority,
}

/// The kitchen's polled view of the ticket store
pub struct KitchenBoard {
    store: TicketStore,
    entries: RwLock<Vec<BoardEntry>>,
}

impl KitchenBoard {
    pub fn new(store: TicketStore) -> Self {
        Self {
            store,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Rebuild the cached view from the store.
    ///
    /// Sort order: every Preparing ticket before all others; within each
    /// group, newest first.
    pub fn refresh(&self) -> StoreResult<()> {
        let now = now_millis();
        let mut entries: Vec<BoardEntry> = self
            .store
            .list_all()?
            .into_iter()
            .map(|t| BoardEntry::derive(t, now))
            .collect();

        entries.sort_by(|a, b| {
            let a_prep = a.ticket.status == TicketStatus::Preparing;
            let b_prep = b.ticket.status == TicketStatus::Preparing;
            b_prep
                .cmp(&a_prep)
                .then(b.ticket.timestamp.cmp(&a.ticket.timestamp))
        });

        *self.entries.write() = entries;
        Ok(())
    }

    /// The active board: everything except Served tickets
    pub fn entries(&self) -> Vec<BoardEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.ticket.status != TicketStatus::Served)
            .cloned()
            .collect()
    }

    /// Board entries with exactly the given status
    pub fn entries_with_status(&self, status: TicketStatus) -> Vec<BoardEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.ticket.status == status)
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<BoardEntry> {
        self.entries
            .read()
            .iter()
            .find(|e| e.ticket.id == id)
            .cloned()
    }

    /// Look a ticket up in the cached view, falling back to the store for
    /// tickets that arrived after the last tick
    pub fn find_or_load(&self, id: &str) -> StoreResult<Option<BoardEntry>> {
        if let Some(entry) = self.find(id) {
            return Ok(Some(entry));
        }
        Ok(self
            .store
            .find(id)?
            .map(|t| BoardEntry::derive(t, now_millis())))
    }

    pub fn stats(&self) -> BoardStats {
        let entries = self.entries.read();
        let count = |s: TicketStatus| entries.iter().filter(|e| e.ticket.status == s).count();
        BoardStats {
            sent: count(TicketStatus::Sent),
            preparing: count(TicketStatus::Preparing),
            ready: count(TicketStatus::Ready),
        }
    }

    /// Tickets still waiting that arrived within the last minute
    pub fn notifications(&self) -> Vec<BoardNotification> {
        let now = now_millis();
        self.entries
            .read()
            .iter()
            .filter(|e| {
                e.ticket.status == TicketStatus::Sent
                    && now - e.ticket.timestamp < NEW_TICKET_WINDOW_MILLIS
            })
            .map(|e| BoardNotification {
                id: format!("order-{}", e.ticket.id),
                title: "Nueva Comanda".to_string(),
                message: format!(
                    "Mesa {} - {} productos",
                    e.ticket.table.number,
                    e.ticket.items.len()
                ),
                priority: Priority::High,
            })
            .collect()
    }

    /// Advance one ticket and patch the cached entry in place.
    ///
    /// The full view is not rebuilt here; other tickets keep their derived
    /// fields until the next poll tick.
    pub fn set_status(&self, id: &str, to: TicketStatus) -> StoreResult<Ticket> {
        let updated = self.store.upsert_status(id, to)?;

        let now = now_millis();
        let mut entries = self.entries.write();
        if let Some(entry) = entries.iter_mut().find(|e| e.ticket.id == id) {
            *entry = BoardEntry::derive(updated.clone(), now);
        }
        Ok(updated)
    }

    /// Move every currently-preparing ticket to Ready.
    ///
    /// Each ticket is an independent `set_status` call, not an atomic batch:
    /// a failure mid-loop leaves the earlier tickets transitioned.
    pub fn mark_all_ready(&self) -> StoreResult<Vec<Ticket>> {
        let preparing_ids: Vec<String> = self
            .entries
            .read()
            .iter()
            .filter(|e| e.ticket.status == TicketStatus::Preparing)
            .map(|e| e.ticket.id.clone())
            .collect();

        let mut updated = Vec::with_capacity(preparing_ids.len());
        for id in preparing_ids {
            updated.push(self.set_status(&id, TicketStatus::Ready)?);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ProductCategory, TableSnapshot};

    fn ticket(id: &str, timestamp: i64, lines: &[(ProductCategory, i32)]) -> Ticket {
        Ticket {
            id: id.to_string(),
            table: TableSnapshot {
                number: "5".to_string(),
                area: "Salón Principal".to_string(),
                capacity: 4,
            },
            items: lines
                .iter()
                .enumerate()
                .map(|(i, (category, quantity))| TicketLine {
                    product_id: format!("p{}", i),
                    name: format!("Item {}", i),
                    quantity: *quantity,
                    category: *category,
                    price: 10.0,
                    note: None,
                })
                .collect(),
            notes: None,
            customer_name: None,
            waiter: "María García".to_string(),
            status: TicketStatus::Sent,
            timestamp,
            started_at: None,
            updated_at: timestamp,
        }
    }

    fn board_with_store() -> (KitchenBoard, TicketStore) {
        let store = TicketStore::open_in_memory().unwrap();
        (KitchenBoard::new(store.clone()), store)
    }

    #[test]
    fn test_estimate_is_per_line_not_per_unit() {
        // Two paellas on one line: the main-course constant applies once
        let t = ticket("t", 0, &[(ProductCategory::Mains, 2)]);
        assert_eq!(estimate_prep_minutes(&t.items), 15);

        // Lines add up: main + appetizer + dessert + beverage
        let t = ticket(
            "t",
            0,
            &[
                (ProductCategory::Mains, 1),
                (ProductCategory::Appetizers, 3),
                (ProductCategory::Desserts, 1),
                (ProductCategory::Beverages, 4),
            ],
        );
        assert_eq!(estimate_prep_minutes(&t.items), 30);

        // Floor at 5 minutes
        let t = ticket("t", 0, &[(ProductCategory::Beverages, 1)]);
        assert_eq!(estimate_prep_minutes(&t.items), 5);
    }

    #[test]
    fn test_refresh_sorts_preparing_first_then_newest() {
        let (board, store) = board_with_store();
        let now = now_millis();

        store.append(&ticket("sent-old", now - 50_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("prep-old", now - 40_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("ready-new", now - 20_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("prep-new", now - 10_000, &[(ProductCategory::Mains, 1)])).unwrap();

        store.upsert_status("prep-old", TicketStatus::Preparing).unwrap();
        store.upsert_status("prep-new", TicketStatus::Preparing).unwrap();
        store.upsert_status("ready-new", TicketStatus::Preparing).unwrap();
        store.upsert_status("ready-new", TicketStatus::Ready).unwrap();

        board.refresh().unwrap();
        let ids: Vec<String> = board.entries().iter().map(|e| e.ticket.id.clone()).collect();

        // Preparing group first (newest first), then the rest newest first
        assert_eq!(ids, vec!["prep-new", "prep-old", "ready-new", "sent-old"]);
    }

    #[test]
    fn test_entries_filter_served_out() {
        let (board, store) = board_with_store();
        let now = now_millis();

        store.append(&ticket("active", now, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("done", now - 1_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.upsert_status("done", TicketStatus::Preparing).unwrap();
        store.upsert_status("done", TicketStatus::Ready).unwrap();
        store.upsert_status("done", TicketStatus::Served).unwrap();

        board.refresh().unwrap();
        let ids: Vec<String> = board.entries().iter().map(|e| e.ticket.id.clone()).collect();
        assert_eq!(ids, vec!["active"]);

        // But the served ticket is still findable by id
        assert!(board.find("done").is_some());
    }

    #[test]
    fn test_priority_derivation_from_wait() {
        let (board, store) = board_with_store();
        let now = now_millis();

        store.append(&ticket("fresh", now - 60_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("high", now - 16 * 60_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("urgent", now - 31 * 60_000, &[(ProductCategory::Mains, 1)])).unwrap();

        board.refresh().unwrap();
        assert_eq!(board.find("fresh").unwrap().priority, Priority::Normal);
        assert_eq!(board.find("high").unwrap().priority, Priority::High);
        assert_eq!(board.find("urgent").unwrap().priority, Priority::Urgent);
    }

    #[test]
    fn test_staleness_until_next_refresh() {
        let (board, store) = board_with_store();
        let now = now_millis();

        store.append(&ticket("first", now, &[(ProductCategory::Mains, 1)])).unwrap();
        board.refresh().unwrap();
        assert_eq!(board.entries().len(), 1);

        // Producer appends behind the board's back: invisible until the
        // next tick
        store.append(&ticket("second", now, &[(ProductCategory::Mains, 1)])).unwrap();
        assert_eq!(board.entries().len(), 1);

        board.refresh().unwrap();
        assert_eq!(board.entries().len(), 2);
    }

    #[test]
    fn test_set_status_patches_cache_in_place() {
        let (board, store) = board_with_store();
        store.append(&ticket("t-1", now_millis(), &[(ProductCategory::Mains, 1)])).unwrap();
        board.refresh().unwrap();

        let updated = board.set_status("t-1", TicketStatus::Preparing).unwrap();
        assert!(updated.started_at.is_some());

        // Cache reflects the change without a refresh
        let entry = board.find("t-1").unwrap();
        assert_eq!(entry.ticket.status, TicketStatus::Preparing);
        assert_eq!(board.stats().preparing, 1);
    }

    #[test]
    fn test_mark_all_ready_moves_every_preparing_ticket() {
        let (board, store) = board_with_store();
        let now = now_millis();

        for i in 0..3 {
            store.append(&ticket(&format!("prep-{}", i), now - i, &[(ProductCategory::Mains, 1)])).unwrap();
            store.upsert_status(&format!("prep-{}", i), TicketStatus::Preparing).unwrap();
        }
        store.append(&ticket("waiting", now, &[(ProductCategory::Mains, 1)])).unwrap();

        board.refresh().unwrap();
        assert_eq!(board.stats().preparing, 3);

        let before = now_millis();
        let updated = board.mark_all_ready().unwrap();
        assert_eq!(updated.len(), 3);
        assert!(updated.iter().all(|t| t.status == TicketStatus::Ready));
        assert!(updated.iter().all(|t| t.updated_at >= before));

        assert_eq!(board.stats().preparing, 0);
        assert_eq!(board.stats().ready, 3);
        // The Sent ticket is untouched
        assert_eq!(board.stats().sent, 1);
    }

    #[test]
    fn test_notifications_window() {
        let (board, store) = board_with_store();
        let now = now_millis();

        store.append(&ticket("new", now - 5_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("stale", now - 120_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.append(&ticket("started", now - 5_000, &[(ProductCategory::Mains, 1)])).unwrap();
        store.upsert_status("started", TicketStatus::Preparing).unwrap();

        board.refresh().unwrap();
        let notes = board.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "order-new");
        assert_eq!(notes[0].message, "Mesa 5 - 1 productos");
    }
}
