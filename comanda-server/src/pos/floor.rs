//! Floor plan
//!
//! The dining room layout the waiter picks tables from. Table status lives
//! here, independently of ticket status: sending a comanda does not flip a
//! table to Occupied. The two lifecycles are deliberately decoupled.

use parking_lot::RwLock;

use shared::models::{DiningTable, TableStatus};

/// Dining room layout with per-table status
#[derive(Debug)]
pub struct FloorPlan {
    tables: RwLock<Vec<DiningTable>>,
}

impl FloorPlan {
    /// The seeded dining room: Terraza, Salón Principal and Área VIP
    pub fn seeded() -> Self {
        use TableStatus::*;

        let layout: &[(i64, &str, &str, i32, TableStatus)] = &[
            (1, "1", "Terraza", 2, Available),
            (2, "2", "Terraza", 2, Occupied),
            (3, "3", "Terraza", 4, Available),
            (4, "4", "Terraza", 4, Reserved),
            (5, "5", "Salón Principal", 4, Occupied),
            (6, "6", "Salón Principal", 6, Available),
            (7, "7", "Salón Principal", 6, Cleaning),
            (8, "8", "Salón Principal", 8, Available),
            (9, "9", "Área VIP", 2, Available),
            (10, "10", "Área VIP", 2, Occupied),
        ];

        let tables = layout
            .iter()
            .map(|(id, number, area, capacity, status)| DiningTable {
                id: *id,
                number: (*number).to_string(),
                area: (*area).to_string(),
                capacity: *capacity,
                status: *status,
            })
            .collect();

        Self {
            tables: RwLock::new(tables),
        }
    }

    pub fn list(&self) -> Vec<DiningTable> {
        self.tables.read().clone()
    }

    pub fn find_by_number(&self, number: &str) -> Option<DiningTable> {
        self.tables
            .read()
            .iter()
            .find(|t| t.number == number)
            .cloned()
    }

    /// Change a table's occupancy status
    pub fn set_status(&self, number: &str, status: TableStatus) -> bool {
        let mut tables = self.tables.write();
        match tables.iter_mut().find(|t| t.number == number) {
            Some(table) => {
                table.status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_floor_shape() {
        let floor = FloorPlan::seeded();
        assert_eq!(floor.list().len(), 10);

        let t7 = floor.find_by_number("7").unwrap();
        assert_eq!(t7.status, TableStatus::Cleaning);
        assert!(!t7.status.is_selectable());

        let t5 = floor.find_by_number("5").unwrap();
        assert_eq!(t5.area, "Salón Principal");
        assert!(t5.status.is_selectable());
    }

    #[test]
    fn test_set_status() {
        let floor = FloorPlan::seeded();
        assert!(floor.set_status("1", TableStatus::Cleaning));
        assert_eq!(
            floor.find_by_number("1").unwrap().status,
            TableStatus::Cleaning
        );
        assert!(!floor.set_status("99", TableStatus::Available));
    }
}
