//! Shared domain types for DevBurger.
//!
//! This crate contains the core domain types used across the DevBurger
//! ordering agent: conversation turns, tool calls, chat-model request/reply
//! shapes, menu items, orders, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, rust_decimal,
//! thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod menu;
pub mod order;
