//! Infrastructure layer for DevBurger.
//!
//! Contains implementations of the ports defined in `devburger-core`:
//! sqlx/SQLite storage for the menu catalog and the order ledger, the
//! OpenAI-compatible chat-model client, and the configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
