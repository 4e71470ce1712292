//! Menu catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One orderable item in the catalog.
///
/// `name` is the unique, case-sensitive key the model must echo back exactly
/// when finalizing an order. `description` exists for the model to sell the
/// item with; it is never matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Current unit price; orders snapshot it at order time.
    pub price: Decimal,
    /// Grouping label (e.g. "Lanche", "Bebida").
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_serde() {
        let item = MenuItem {
            id: 1,
            name: "X-Python".to_string(),
            description: "Pão brioche, burger 180g.".to_string(),
            price: Decimal::new(2890, 2),
            category: "Lanche".to_string(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"X-Python\""));
        let parsed: MenuItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
        assert_eq!(format!("{:.2}", parsed.price), "28.90");
    }
}
