//! The streaming-response aggregation and dual-write pipeline.

pub mod aggregator;
pub mod context;
pub mod log;
pub mod orchestrator;

pub use aggregator::{ReplyAccumulator, snapshots};
pub use context::{ConversationContext, Turn, compose_directive};
pub use log::SessionLog;
pub use orchestrator::{OrderPipeline, TurnEvent, TurnRequest};
