//! Kitchen ticket (comanda) model
//!
//! A ticket is one table's requested items at a point in time. The waiter
//! builds it at the POS and sends it to the kitchen; the kitchen advances it
//! through a small state machine until it is served.
//!
//! # State machine
//!
//! ```text
//! SENT ──▶ PREPARING ──▶ READY ──▶ SERVED (terminal)
//!   ▲          │
//!   └──────────┘  (revert to pending)
//! ```
//!
//! Any other transition is rejected with [`TransitionError`]. There is no
//! void/cancel state for kitchen tickets.

use serde::{Deserialize, Serialize};

use crate::models::product::ProductCategory;
use crate::util::minutes_between;

/// Ticket status as enforced by the transition table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Sent to the kitchen, waiting to be picked up
    #[default]
    Sent,
    /// A cook is working on it
    Preparing,
    /// Done, waiting for the waiter to collect
    Ready,
    /// Delivered to the table (terminal, filtered off the active board)
    Served,
}

impl TicketStatus {
    /// Whether `self -> to` is a legal transition.
    ///
    /// The only back-edge is `Preparing -> Sent` (explicit revert); nothing
    /// is reachable from `Served`.
    pub fn can_transition(self, to: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, to),
            (Sent, Preparing) | (Preparing, Ready) | (Preparing, Sent) | (Ready, Served)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TicketStatus::Served)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TicketStatus::Sent => "SENT",
            TicketStatus::Preparing => "PREPARING",
            TicketStatus::Ready => "READY",
            TicketStatus::Served => "SERVED",
        };
        write!(f, "{}", s)
    }
}

/// Rejected status change
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Illegal ticket transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: TicketStatus,
    pub to: TicketStatus,
}

/// Derived urgency classification based on wait time (not an input field)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

/// Wait strictly beyond this many minutes bumps a ticket to High
pub const HIGH_WAIT_MINUTES: i64 = 15;
/// Wait strictly beyond this many minutes bumps a ticket to Urgent
pub const URGENT_WAIT_MINUTES: i64 = 30;

impl Priority {
    /// Classify a wait time in whole minutes.
    ///
    /// Thresholds are exclusive: exactly 15 is still Normal, exactly 30 is
    /// still High.
    pub fn from_wait_minutes(minutes: i64) -> Self {
        if minutes > URGENT_WAIT_MINUTES {
            Priority::Urgent
        } else if minutes > HIGH_WAIT_MINUTES {
            Priority::High
        } else {
            Priority::Normal
        }
    }
}

/// Table identity captured by value at send time.
///
/// Deliberately a snapshot, not a reference: later changes to the floor plan
/// do not retroactively edit tickets already in the kitchen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSnapshot {
    pub number: String,
    pub area: String,
    pub capacity: i32,
}

/// One line of a ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketLine {
    /// Product reference (String ID)
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
    pub category: ProductCategory,
    /// Price per unit in currency units
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Kitchen ticket entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Producer-assigned ID, unique in the store. Immutable.
    pub id: String,
    pub table: TableSnapshot,
    /// Set once at send time; never mutated afterwards
    pub items: Vec<TicketLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Identity of the waiter who sent it. Immutable.
    pub waiter: String,
    pub status: TicketStatus,
    /// Creation instant (Unix millis); drives wait time and priority
    pub timestamp: i64,
    /// Set on the FIRST transition into Preparing, then never cleared,
    /// even if the ticket is reverted to Sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    /// Refreshed on every status transition
    pub updated_at: i64,
}

impl Ticket {
    /// Apply a status transition at instant `now`.
    ///
    /// Enforces the transition table, refreshes `updated_at`, and stamps
    /// `started_at` the first time the ticket enters Preparing. Reverting to
    /// Sent leaves `started_at` untouched.
    pub fn apply_status(&mut self, to: TicketStatus, now: i64) -> Result<(), TransitionError> {
        if !self.status.can_transition(to) {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        if to == TicketStatus::Preparing && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    /// Whole minutes since the ticket was sent
    pub fn wait_minutes(&self, now: i64) -> i64 {
        minutes_between(self.timestamp, now)
    }

    /// Whole minutes since preparation started; 0 if not yet started
    pub fn elapsed_minutes(&self, now: i64) -> i64 {
        self.started_at
            .map(|s| minutes_between(s, now))
            .unwrap_or(0)
    }

    pub fn priority(&self, now: i64) -> Priority {
        Priority::from_wait_minutes(self.wait_minutes(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: "TER-1-1000".to_string(),
            table: TableSnapshot {
                number: "1".to_string(),
                area: "Terraza".to_string(),
                capacity: 2,
            },
            items: vec![TicketLine {
                product_id: "main1".to_string(),
                name: "Paella Valenciana".to_string(),
                quantity: 1,
                category: ProductCategory::Mains,
                price: 18.0,
                note: None,
            }],
            notes: None,
            customer_name: None,
            waiter: "María García".to_string(),
            status,
            timestamp: 1_000,
            started_at: None,
            updated_at: 1_000,
        }
    }

    #[test]
    fn test_legal_transitions() {
        use TicketStatus::*;
        assert!(Sent.can_transition(Preparing));
        assert!(Preparing.can_transition(Ready));
        assert!(Preparing.can_transition(Sent));
        assert!(Ready.can_transition(Served));
    }

    #[test]
    fn test_illegal_transitions() {
        use TicketStatus::*;
        assert!(!Sent.can_transition(Ready));
        assert!(!Sent.can_transition(Served));
        assert!(!Ready.can_transition(Sent));
        assert!(!Ready.can_transition(Preparing));
        assert!(!Served.can_transition(Sent));
        assert!(!Served.can_transition(Preparing));
        assert!(!Served.can_transition(Ready));
        assert!(!Sent.can_transition(Sent));
    }

    #[test]
    fn test_apply_status_stamps_started_at_once() {
        let mut ticket = test_ticket(TicketStatus::Sent);
        assert_eq!(ticket.started_at, None);

        ticket.apply_status(TicketStatus::Preparing, 5_000).unwrap();
        assert_eq!(ticket.started_at, Some(5_000));
        assert_eq!(ticket.updated_at, 5_000);

        // Ready does not touch started_at
        ticket.apply_status(TicketStatus::Ready, 9_000).unwrap();
        assert_eq!(ticket.started_at, Some(5_000));
        assert_eq!(ticket.updated_at, 9_000);
    }

    #[test]
    fn test_revert_keeps_started_at() {
        let mut ticket = test_ticket(TicketStatus::Sent);
        ticket.apply_status(TicketStatus::Preparing, 5_000).unwrap();
        ticket.apply_status(TicketStatus::Sent, 7_000).unwrap();
        assert_eq!(ticket.status, TicketStatus::Sent);
        assert_eq!(ticket.started_at, Some(5_000));

        // Second start does not re-stamp
        ticket.apply_status(TicketStatus::Preparing, 8_000).unwrap();
        assert_eq!(ticket.started_at, Some(5_000));
    }

    #[test]
    fn test_apply_status_rejects_illegal() {
        let mut ticket = test_ticket(TicketStatus::Sent);
        let err = ticket
            .apply_status(TicketStatus::Served, 5_000)
            .unwrap_err();
        assert_eq!(err.from, TicketStatus::Sent);
        assert_eq!(err.to, TicketStatus::Served);
        // Rejected transition leaves the ticket untouched
        assert_eq!(ticket.status, TicketStatus::Sent);
        assert_eq!(ticket.updated_at, 1_000);
    }

    #[test]
    fn test_priority_boundaries() {
        // Exactly at the threshold stays in the lower class
        assert_eq!(Priority::from_wait_minutes(14), Priority::Normal);
        assert_eq!(Priority::from_wait_minutes(15), Priority::Normal);
        assert_eq!(Priority::from_wait_minutes(16), Priority::High);
        assert_eq!(Priority::from_wait_minutes(29), Priority::High);
        assert_eq!(Priority::from_wait_minutes(30), Priority::High);
        assert_eq!(Priority::from_wait_minutes(31), Priority::Urgent);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::Sent).unwrap(),
            "\"SENT\""
        );
        assert_eq!(
            serde_json::to_string(&TicketStatus::Preparing).unwrap(),
            "\"PREPARING\""
        );
        let status: TicketStatus = serde_json::from_str("\"READY\"").unwrap();
        assert_eq!(status, TicketStatus::Ready);
    }

    #[test]
    fn test_elapsed_minutes_zero_before_start() {
        let ticket = test_ticket(TicketStatus::Sent);
        assert_eq!(ticket.elapsed_minutes(10_000_000), 0);

        let mut started = ticket.clone();
        started
            .apply_status(TicketStatus::Preparing, 60_000)
            .unwrap();
        assert_eq!(started.elapsed_minutes(60_000 + 5 * 60_000), 5);
    }
}
