//! Observability initialization for Orderdesk.

pub mod tracing_setup;
