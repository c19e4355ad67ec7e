use thiserror::Error;

use crate::llm::LlmError;

/// Errors from record-store operations (used by trait definitions in
/// orderdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Terminal errors of one pipeline invocation.
///
/// A `TokenSource` error means the invocation aborted mid-stream with no
/// durable side effects. A `Persistence` error means the session log already
/// holds the record but the durable insert failed (documented divergence).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("token source failed: {0}")]
    TokenSource(#[from] LlmError),

    #[error("durable insert failed: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Errors raised while resolving process-wide configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("invalid mail address '{0}'")]
    InvalidAddress(String),
}
