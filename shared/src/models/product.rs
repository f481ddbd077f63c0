//! Product Model

use serde::{Deserialize, Serialize};

/// Menu category.
///
/// Carries the kitchen's per-category preparation constant. `Other` is the
/// fallback bucket for anything the menu does not classify.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Appetizers,
    Mains,
    Beverages,
    Desserts,
    #[default]
    Other,
}

impl ProductCategory {
    /// Kitchen prep time in minutes, applied once per ticket line
    pub fn prep_minutes(self) -> i64 {
        match self {
            ProductCategory::Mains => 15,
            ProductCategory::Appetizers => 8,
            ProductCategory::Desserts => 5,
            ProductCategory::Beverages => 2,
            ProductCategory::Other => 10,
        }
    }

    /// Spanish display name, as printed on tickets and menus
    pub fn display_name(self) -> &'static str {
        match self {
            ProductCategory::Appetizers => "Aperitivos",
            ProductCategory::Mains => "Platos Principales",
            ProductCategory::Beverages => "Bebidas",
            ProductCategory::Desserts => "Postres",
            ProductCategory::Other => "Otros",
        }
    }
}

/// Menu product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    /// Price per unit in currency units
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Highlighted on the catalog grid
    #[serde(default)]
    pub popular: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prep_minutes_ordering() {
        // main course > appetizer > dessert > beverage, default in between
        assert_eq!(ProductCategory::Mains.prep_minutes(), 15);
        assert_eq!(ProductCategory::Appetizers.prep_minutes(), 8);
        assert_eq!(ProductCategory::Desserts.prep_minutes(), 5);
        assert_eq!(ProductCategory::Beverages.prep_minutes(), 2);
        assert_eq!(ProductCategory::Other.prep_minutes(), 10);
    }
}
