//! Exchange record types for Orderdesk.
//!
//! An exchange is one customer-message / assistant-reply pair plus metadata.
//! Records are immutable once finalized; the durable store assigns a
//! monotonically increasing surrogate id on insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One finalized customer/assistant exchange.
///
/// Serde field names match the durable `orders` table columns, so the same
/// shape serializes for export and for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Completion time, assigned once at finalization.
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied contact identifier (usually an email), may be empty.
    #[serde(rename = "email")]
    pub contact: String,
    /// The inbound customer message.
    #[serde(rename = "user")]
    pub user_message: String,
    /// The fully assembled assistant reply.
    #[serde(rename = "assistant")]
    pub assistant_reply: String,
}

/// An exchange record as read back from the durable store, with its
/// store-assigned surrogate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredExchange {
    pub id: i64,
    #[serde(flatten)]
    pub record: ExchangeRecord,
}

/// Ordering for full-table scans of the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOrder {
    IdAscending,
    IdDescending,
}

impl fmt::Display for ScanOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanOrder::IdAscending => write!(f, "asc"),
            ScanOrder::IdDescending => write!(f, "desc"),
        }
    }
}

impl FromStr for ScanOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(ScanOrder::IdAscending),
            "desc" | "descending" => Ok(ScanOrder::IdDescending),
            other => Err(format!("invalid scan order: '{other}'")),
        }
    }
}
