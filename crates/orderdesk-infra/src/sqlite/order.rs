//! SQLite order repository implementation.
//!
//! Implements `OrderRepository` from `orderdesk-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, inserts through the
//! single-connection writer.

use chrono::{DateTime, Utc};
use sqlx::Row;

use orderdesk_core::repository::OrderRepository;
use orderdesk_types::error::RepositoryError;
use orderdesk_types::order::{ExchangeRecord, ScanOrder, StoredExchange};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `OrderRepository`.
pub struct SqliteOrderRepository {
    pool: DatabasePool,
}

impl SqliteOrderRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain records.
struct OrderRow {
    id: i64,
    timestamp: String,
    email: String,
    user: String,
    assistant: String,
}

impl OrderRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            timestamp: row.try_get("timestamp")?,
            email: row.try_get("email")?,
            user: row.try_get("user")?,
            assistant: row.try_get("assistant")?,
        })
    }

    fn into_stored(self) -> Result<StoredExchange, RepositoryError> {
        let timestamp = parse_datetime(&self.timestamp)?;
        Ok(StoredExchange {
            id: self.id,
            record: ExchangeRecord {
                timestamp,
                contact: self.email,
                user_message: self.user,
                assistant_reply: self.assistant,
            },
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid timestamp: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl OrderRepository for SqliteOrderRepository {
    async fn insert(&self, record: &ExchangeRecord) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO orders (timestamp, email, user, assistant) VALUES (?, ?, ?, ?)"#,
        )
        .bind(format_datetime(&record.timestamp))
        .bind(&record.contact)
        .bind(&record.user_message)
        .bind(&record.assistant_reply)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn scan_all(&self, order: ScanOrder) -> Result<Vec<StoredExchange>, RepositoryError> {
        let sql = match order {
            ScanOrder::IdAscending => "SELECT * FROM orders ORDER BY id ASC",
            ScanOrder::IdDescending => "SELECT * FROM orders ORDER BY id DESC",
        };

        let rows = sqlx::query(sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let order_row =
                    OrderRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                order_row.into_stored()
            })
            .collect()
    }
}
