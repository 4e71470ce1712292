//! CatalogRepository trait definition.
//!
//! Read-only lookup of orderable items. Implementations live in
//! devburger-infra (e.g., `SqliteCatalogRepository`). Uses native async fn
//! in traits (RPITIT, Rust 2024 edition).

use devburger_types::error::RepositoryError;
use devburger_types::menu::MenuItem;

/// Repository trait for the read-only menu catalog.
pub trait CatalogRepository: Send + Sync {
    /// All orderable items, in catalog order.
    fn get_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MenuItem>, RepositoryError>> + Send;

    /// Look up a single item by its exact, case-sensitive name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<MenuItem>, RepositoryError>> + Send;
}
