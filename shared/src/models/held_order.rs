//! Held Order Model
//!
//! A draft the cashier suspended to serve someone else first. Held orders
//! never reach the kitchen; recall restores the most recent one to the pad.

use serde::{Deserialize, Serialize};

use crate::models::ticket::TicketLine;

/// Suspended draft order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeldOrder {
    pub id: String,
    pub items: Vec<TicketLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Instant the order was suspended (Unix millis)
    pub timestamp: i64,
}
