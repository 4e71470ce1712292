//! SQLite persistence built on sqlx with split read/write pools.

pub mod catalog;
pub mod orders;
pub mod pool;
