//! OrderRepository trait definition.
//!
//! The durable record store is append-only: records are immutable once
//! written, and there are no update or delete operations in this design.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use orderdesk_types::error::RepositoryError;
use orderdesk_types::order::{ExchangeRecord, ScanOrder, StoredExchange};

/// Repository trait for durable exchange-record persistence.
///
/// Implementations live in orderdesk-infra (e.g., `SqliteOrderRepository`).
pub trait OrderRepository: Send + Sync {
    /// Insert a finalized record, returning its store-assigned surrogate id.
    ///
    /// Ids are strictly increasing across inserts. Either succeeds or raises
    /// a storage fault; never silently drops a record.
    fn insert(
        &self,
        record: &ExchangeRecord,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Return every stored record ordered by id, ascending or descending.
    ///
    /// Read-only and side-effect-free.
    fn scan_all(
        &self,
        order: ScanOrder,
    ) -> impl std::future::Future<Output = Result<Vec<StoredExchange>, RepositoryError>> + Send;
}
