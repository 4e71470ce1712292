//! OrderLedger trait definition.
//!
//! Durable, transactional creation of orders and their lines.
//! Implementations live in devburger-infra (e.g., `SqliteOrderLedger`).

use devburger_types::error::RepositoryError;
use devburger_types::order::{LedgerError, OrderRequest, PlacedOrder};

/// The durable store of placed orders.
pub trait OrderLedger: Send + Sync {
    /// Atomically persist an order and all its lines, snapshotting each
    /// product's current price and computing the total in the same
    /// transaction. Either the fully formed order commits, or nothing does.
    fn create_order(
        &self,
        request: &OrderRequest,
    ) -> impl std::future::Future<Output = Result<PlacedOrder, LedgerError>> + Send;

    /// Total number of committed orders.
    fn count_orders(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Fetch a committed order with its lines.
    fn get_order(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<PlacedOrder>, RepositoryError>> + Send;
}
