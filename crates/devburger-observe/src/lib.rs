//! Observability setup for DevBurger.

pub mod tracing_setup;
