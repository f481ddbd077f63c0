//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::models::ticket::TableSnapshot;

/// Table occupancy status.
///
/// Maintained by the floor plan, independently of ticket status: sending a
/// comanda does not flip the table to Occupied. The two lifecycles are
/// intentionally decoupled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    /// Whether a waiter may open a new comanda on this table.
    ///
    /// Occupied tables stay selectable (adding a second round to a seated
    /// party); Reserved and Cleaning do not.
    pub fn is_selectable(self) -> bool {
        matches!(self, TableStatus::Available | TableStatus::Occupied)
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiningTable {
    pub id: i64,
    pub number: String,
    pub area: String,
    pub capacity: i32,
    pub status: TableStatus,
}

impl DiningTable {
    /// Value snapshot stamped onto tickets at send time
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            number: self.number.clone(),
            area: self.area.clone(),
            capacity: self.capacity,
        }
    }
}
