//! SQLite order ledger with a single-transaction finalization path.
//!
//! Implements `OrderLedger` from `devburger-core`. `create_order` runs
//! entirely inside one transaction on the writer pool: product prices are
//! re-resolved inside the transaction (the authoritative snapshot), the
//! order row is inserted to obtain its id, lines are inserted with the
//! snapshotted unit price, and the computed total is written before commit.
//! Returning early on any failure drops the transaction, rolling everything
//! back -- the caller observes the fully formed order or nothing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use std::str::FromStr;
use tracing::info;

use devburger_core::ledger::OrderLedger;
use devburger_types::error::RepositoryError;
use devburger_types::order::{
    LedgerError, Order, OrderLine, OrderRequest, OrderStatus, PlacedOrder,
};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `OrderLedger`.
#[derive(Clone)]
pub struct SqliteOrderLedger {
    pool: DatabasePool,
}

impl SqliteOrderLedger {
    /// Create a new ledger backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Order.
struct OrderRow {
    id: i64,
    customer_name: String,
    phone: String,
    address: String,
    status: String,
    created_at: String,
    total: String,
}

impl OrderRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            total: row.try_get("total")?,
        })
    }

    fn into_order(self) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;
        let total = parse_decimal(&self.total)?;

        Ok(Order {
            id: self.id,
            customer_name: self.customer_name,
            phone: self.phone,
            address: self.address,
            status,
            created_at,
            total,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain OrderLine.
struct OrderLineRow {
    id: i64,
    order_id: i64,
    product_name: String,
    quantity: i64,
    unit_price: String,
    note: Option<String>,
}

impl OrderLineRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            product_name: row.try_get("product_name")?,
            quantity: row.try_get("quantity")?,
            unit_price: row.try_get("unit_price")?,
            note: row.try_get("note")?,
        })
    }

    fn into_line(self) -> Result<OrderLine, RepositoryError> {
        let unit_price = parse_decimal(&self.unit_price)?;
        Ok(OrderLine {
            id: self.id,
            order_id: self.order_id,
            product_name: self.product_name,
            quantity: self.quantity as u32,
            unit_price,
            note: self.note,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(s).map_err(|e| RepositoryError::Query(format!("invalid decimal: {e}")))
}

fn storage(e: sqlx::Error) -> LedgerError {
    LedgerError::Storage(e.to_string())
}

// ---------------------------------------------------------------------------
// OrderLedger implementation
// ---------------------------------------------------------------------------

impl OrderLedger for SqliteOrderLedger {
    async fn create_order(&self, request: &OrderRequest) -> Result<PlacedOrder, LedgerError> {
        request.validate()?;

        let mut tx = self.pool.writer.begin().await.map_err(storage)?;

        // Resolve prices inside the transaction -- the authoritative
        // snapshot, immune to the gap between any earlier pre-check and
        // commit.
        let mut resolved = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let row = sqlx::query("SELECT price FROM products WHERE name = ?")
                .bind(&item.product_name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage)?;
            let Some(row) = row else {
                return Err(LedgerError::UnknownProduct(item.product_name.clone()));
            };
            let price: String = row.try_get("price").map_err(storage)?;
            let unit_price = parse_decimal(&price).map_err(|e| LedgerError::Storage(e.to_string()))?;
            resolved.push((item, unit_price));
        }

        let created_at = Utc::now();
        let status = OrderStatus::Received;
        let result = sqlx::query(
            r#"INSERT INTO orders (customer_name, phone, address, status, created_at, total)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&request.customer_name)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(status.to_string())
        .bind(created_at.to_rfc3339())
        .bind("0")
        .execute(&mut *tx)
        .await
        .map_err(storage)?;
        let order_id = result.last_insert_rowid();

        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(request.items.len());
        for (item, unit_price) in resolved {
            let result = sqlx::query(
                r#"INSERT INTO order_lines (order_id, product_name, quantity, unit_price, note)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(order_id)
            .bind(&item.product_name)
            .bind(item.quantity as i64)
            .bind(unit_price.to_string())
            .bind(&item.note)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

            total += unit_price * Decimal::from(item.quantity);
            lines.push(OrderLine {
                id: result.last_insert_rowid(),
                order_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price,
                note: item.note.clone(),
            });
        }

        sqlx::query("UPDATE orders SET total = ? WHERE id = ?")
            .bind(total.to_string())
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        info!(order_id, %total, lines = lines.len(), "order committed");

        Ok(PlacedOrder {
            order: Order {
                id: order_id,
                customer_name: request.customer_name.clone(),
                phone: request.phone.clone(),
                address: request.address.clone(),
                status,
                created_at,
                total,
            },
            lines,
        })
    }

    async fn count_orders(&self) -> Result<u64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(row.0 as u64)
    }

    async fn get_order(&self, id: i64) -> Result<Option<PlacedOrder>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let order = OrderRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_order()?;

        let line_rows = sqlx::query("SELECT * FROM order_lines WHERE order_id = ? ORDER BY id")
            .bind(id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let lines = line_rows
            .iter()
            .map(|row| {
                OrderLineRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_line()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(PlacedOrder { order, lines }))
    }
}
