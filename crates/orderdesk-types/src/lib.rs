//! Shared domain types for Orderdesk.
//!
//! This crate contains the core domain types used across the Orderdesk
//! pipeline: exchange records, LLM request/stream types, notification
//! outcomes, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, secrecy, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod notify;
pub mod order;
