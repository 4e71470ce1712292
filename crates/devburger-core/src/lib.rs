//! Business logic and port definitions for DevBurger.
//!
//! This crate defines the "ports" the infrastructure layer implements --
//! [`catalog::CatalogRepository`], [`ledger::OrderLedger`], and
//! [`llm::ChatModel`] -- plus the per-customer [`session::SessionStore`],
//! the typed [`tools::ToolRegistry`], and the [`orchestrator::Orchestrator`]
//! that drives a conversation round. It depends only on `devburger-types`,
//! never on `devburger-infra` or any database/HTTP crate.

pub mod catalog;
pub mod ledger;
pub mod llm;
pub mod orchestrator;
pub mod session;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;
