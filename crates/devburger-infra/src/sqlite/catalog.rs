//! SQLite catalog repository and menu seeding.
//!
//! Implements `CatalogRepository` from `devburger-core` using sqlx with the
//! split read/write pools. Lookups by name are exact and case-sensitive
//! (SQLite's default TEXT comparison; no COLLATE NOCASE on the column).

use rust_decimal::Decimal;
use sqlx::Row;
use std::str::FromStr;
use tracing::info;

use devburger_core::catalog::CatalogRepository;
use devburger_types::error::RepositoryError;
use devburger_types::menu::MenuItem;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CatalogRepository`.
#[derive(Clone)]
pub struct SqliteCatalogRepository {
    pool: DatabasePool,
}

impl SqliteCatalogRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(row.0 as u64)
    }

    /// Insert one product, returning its generated id.
    pub async fn insert(
        &self,
        name: &str,
        description: &str,
        price: Decimal,
        category: &str,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, category) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(price.to_string())
        .bind(category)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(result.last_insert_rowid())
    }

    /// Seed the canonical DevBurger menu when the catalog is empty.
    ///
    /// Returns how many items were inserted (0 when already populated), so
    /// repeated seeding never duplicates products.
    pub async fn seed_default_menu(&self) -> Result<usize, RepositoryError> {
        if self.count().await? > 0 {
            info!("catalog already populated, skipping seed");
            return Ok(0);
        }

        let menu = default_menu();
        for (name, description, price, category) in &menu {
            self.insert(name, description, *price, category).await?;
        }
        info!(items = menu.len(), "catalog seeded");
        Ok(menu.len())
    }
}

/// The canonical DevBurger menu.
fn default_menu() -> [(&'static str, &'static str, Decimal, &'static str); 6] {
    [
        (
            "X-Python",
            "Pão brioche, burger 180g, queijo cheddar, bacon em tiras e molho especial.",
            Decimal::new(2890, 2),
            "Lanche",
        ),
        (
            "Smash Java",
            "Pão australiano, dois burgers de 80g amassados na chapa, queijo prato.",
            Decimal::new(2250, 2),
            "Lanche",
        ),
        (
            "C++ Crispy",
            "Burger de frango empanado super crocante com alface americana e maionese.",
            Decimal::new(2400, 2),
            "Lanche",
        ),
        (
            "Batata Array",
            "Porção de batata frita rústica com alecrim.",
            Decimal::new(1200, 2),
            "Acompanhamento",
        ),
        (
            "Coca-Cola Lata",
            "350ml bem gelada.",
            Decimal::new(600, 2),
            "Bebida",
        ),
        (
            "Suco Natural",
            "Laranja ou Limão 500ml.",
            Decimal::new(1000, 2),
            "Bebida",
        ),
    ]
}

/// Internal row type for mapping SQLite rows to domain MenuItem.
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: String,
    category: String,
}

impl ProductRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
        })
    }

    fn into_item(self) -> Result<MenuItem, RepositoryError> {
        let price = Decimal::from_str(&self.price)
            .map_err(|e| RepositoryError::Query(format!("invalid price: {e}")))?;
        Ok(MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price,
            category: self.category,
        })
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    async fn get_all(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                ProductRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_item()
            })
            .collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM products WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let product = ProductRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(product.into_item()?))
            }
            None => Ok(None),
        }
    }
}
