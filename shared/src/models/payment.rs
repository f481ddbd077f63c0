//! Payment Model

use serde::{Deserialize, Serialize};

use crate::models::ticket::TicketLine;

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

/// Payment record attached to a completed order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub method: PaymentMethod,
    /// Amount charged in currency units
    pub amount: f64,
    /// Cash handed over (cash payments only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tendered: Option<f64>,
    /// Change returned (cash payments only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// Last 4 digits (card payments only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    pub timestamp: i64,
}

/// Finalized, paid order kept for reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedOrder {
    pub id: String,
    pub items: Vec<TicketLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub payment: PaymentRecord,
    /// Grand total including tax, in currency units
    pub total: f64,
    pub timestamp: i64,
}
