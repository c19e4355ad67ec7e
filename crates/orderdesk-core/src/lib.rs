//! Pipeline logic and port trait definitions for Orderdesk.
//!
//! This crate defines the "ports" (record store, token source, notifier)
//! that the infrastructure layer implements, plus the streaming-response
//! aggregation and dual-write pipeline built on top of them. It depends only
//! on `orderdesk-types` -- never on `orderdesk-infra` or any database/IO
//! crate.

pub mod llm;
pub mod notify;
pub mod pipeline;
pub mod repository;
pub mod template;
