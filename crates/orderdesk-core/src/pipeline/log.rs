//! In-memory session log of finalized exchanges.
//!
//! A process-lifetime, append-only mirror of the durable store. It is an
//! explicit injectable value owned by one long-lived pipeline instance --
//! never ambient global state -- so tests substitute a fresh log per case.
//! Divergence from the store is possible only across restarts (the log
//! resets; the store does not) or after a failed durable insert.

use std::sync::{Arc, Mutex, PoisonError};

use orderdesk_types::order::ExchangeRecord;

/// Ordered, append-only sequence of finalized exchange records.
///
/// Clones share the same underlying log, which is how concurrent invocations
/// of one pipeline see a single session history.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Arc<Mutex<Vec<ExchangeRecord>>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized record. O(1) amortized, never fails.
    pub fn append(&self, record: ExchangeRecord) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Number of records logged this session.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recently appended record, if any.
    pub fn last(&self) -> Option<ExchangeRecord> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// A point-in-time copy of every record, in append order.
    pub fn entries(&self) -> Vec<ExchangeRecord> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(message: &str) -> ExchangeRecord {
        ExchangeRecord {
            timestamp: Utc::now(),
            contact: "c@example.com".to_string(),
            user_message: message.to_string(),
            assistant_reply: "ok".to_string(),
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let log = SessionLog::new();
        log.append(record("first"));
        log.append(record("second"));

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user_message, "first");
        assert_eq!(entries[1].user_message, "second");
        assert_eq!(log.last().unwrap().user_message, "second");
    }

    #[test]
    fn test_clones_share_state() {
        let log = SessionLog::new();
        let alias = log.clone();
        alias.append(record("via alias"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_fresh_log_is_empty() {
        let log = SessionLog::new();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
