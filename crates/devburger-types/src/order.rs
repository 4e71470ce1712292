//! Order ledger types.
//!
//! An [`Order`] and its [`OrderLine`]s are committed atomically by the
//! ledger; lines snapshot the product name and unit price at order time so
//! later catalog changes never rewrite history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a placed order.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (status IN ('received', 'preparing', 'delivered'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Received,
    Preparing,
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Received => write!(f, "received"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "received" => Ok(OrderStatus::Received),
            "preparing" => Ok(OrderStatus::Preparing),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(format!("invalid order status: '{other}'")),
        }
    }
}

/// A durably committed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Sum of `unit_price * quantity` over all lines, computed in the same
    /// transaction that inserts them.
    pub total: Decimal,
}

/// One line of an order, snapshotting the product price at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Free-text preparation note (e.g. "sem cebola").
    pub note: Option<String>,
}

/// A committed order together with its lines, as returned by the ledger for
/// confirmation formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

impl PlacedOrder {
    /// Recompute the total from the lines; equals `order.total` by invariant.
    pub fn computed_total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum()
    }
}

/// Input to order finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<LineItemRequest>,
}

/// One requested line item, by exact catalog product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub product_name: String,
    pub quantity: u32,
    pub note: Option<String>,
}

impl OrderRequest {
    /// Check the request invariants: required fields non-empty after trim,
    /// at least one line item, every quantity positive.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(OrderValidationError::MissingField("nameCliente"));
        }
        if self.phone.trim().is_empty() {
            return Err(OrderValidationError::MissingField("phone"));
        }
        if self.address.trim().is_empty() {
            return Err(OrderValidationError::MissingField("address"));
        }
        if self.items.is_empty() {
            return Err(OrderValidationError::EmptyItems);
        }
        for item in &self.items {
            if item.product_name.trim().is_empty() {
                return Err(OrderValidationError::MissingField("items.product"));
            }
            if item.quantity == 0 {
                return Err(OrderValidationError::InvalidQuantity {
                    product: item.product_name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Violations of the [`OrderRequest`] invariants.
///
/// Field names follow the wire schema (`nameCliente`, `phone`, `address`)
/// so the model can ask the customer for exactly what is missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("order must contain at least one item")]
    EmptyItems,

    #[error("invalid quantity for '{product}': must be at least 1")]
    InvalidQuantity { product: String },
}

/// Errors from order-ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A requested product does not exist in the catalog. The whole
    /// transaction rolls back; nothing is persisted.
    #[error("product '{0}' not found")]
    UnknownProduct(String),

    #[error("order rejected: {0}")]
    Invalid(#[from] OrderValidationError),

    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> OrderRequest {
        OrderRequest {
            customer_name: "Ana".to_string(),
            phone: "11999999999".to_string(),
            address: "Rua A, 123".to_string(),
            items: vec![LineItemRequest {
                product_name: "X-Python".to_string(),
                quantity: 2,
                note: None,
            }],
        }
    }

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Received,
            OrderStatus::Preparing,
            OrderStatus::Delivered,
        ] {
            let s = status.to_string();
            let parsed: OrderStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_order_status_default_is_received() {
        assert_eq!(OrderStatus::default(), OrderStatus::Received);
        assert_eq!(OrderStatus::default().to_string(), "received");
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert_eq!(valid_request().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let mut request = valid_request();
        request.customer_name = "  ".to_string();
        assert_eq!(
            request.validate(),
            Err(OrderValidationError::MissingField("nameCliente"))
        );

        let mut request = valid_request();
        request.phone = String::new();
        assert_eq!(
            request.validate(),
            Err(OrderValidationError::MissingField("phone"))
        );

        let mut request = valid_request();
        request.address = String::new();
        assert_eq!(
            request.validate(),
            Err(OrderValidationError::MissingField("address"))
        );
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let mut request = valid_request();
        request.items.clear();
        assert_eq!(request.validate(), Err(OrderValidationError::EmptyItems));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut request = valid_request();
        request.items[0].quantity = 0;
        assert_eq!(
            request.validate(),
            Err(OrderValidationError::InvalidQuantity {
                product: "X-Python".to_string()
            })
        );
    }

    #[test]
    fn test_computed_total_matches_lines() {
        let placed = PlacedOrder {
            order: Order {
                id: 1,
                customer_name: "Ana".to_string(),
                phone: "11999999999".to_string(),
                address: "Rua A, 123".to_string(),
                status: OrderStatus::Received,
                created_at: Utc::now(),
                total: Decimal::new(5780, 2),
            },
            lines: vec![OrderLine {
                id: 1,
                order_id: 1,
                product_name: "X-Python".to_string(),
                quantity: 2,
                unit_price: Decimal::new(2890, 2),
                note: None,
            }],
        };
        assert_eq!(placed.computed_total(), placed.order.total);
        assert_eq!(format!("{:.2}", placed.computed_total()), "57.80");
    }

    #[test]
    fn test_ledger_error_display_names_product() {
        let err = LedgerError::UnknownProduct("X-Rust".to_string());
        assert_eq!(err.to_string(), "product 'X-Rust' not found");
    }
}
