use async_trait::async_trait;

use super::manager::DatabaseError;
use super::schema::Record;

/// Single-statement operations the accessor needs from a relational store.
///
/// Each call checks a connection out of the pool and returns it when the
/// statement finishes; no call spans more than one statement.
#[async_trait]
pub trait Store: Send + Sync {
    async fn count(&self, table: &str) -> Result<i64, DatabaseError>;

    /// Rows ordered by `id`, `limit` rows starting at `offset`.
    async fn select_page(&self, table: &str, offset: i64, limit: i64) -> Result<Vec<Record>, DatabaseError>;

    /// Every row ordered by `id`.
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, DatabaseError>;

    async fn select_by_id(&self, table: &str, id: i64) -> Result<Option<Record>, DatabaseError>;

    async fn select_by_column(&self, table: &str, column: &str, value: i64) -> Result<Vec<Record>, DatabaseError>;

    /// Insert and return the stored `id`.
    async fn insert(&self, table: &str, record: &Record) -> Result<i64, DatabaseError>;

    /// Overwrite the given columns of row `id`; false when no row matched.
    async fn update(&self, table: &str, id: i64, record: &Record) -> Result<bool, DatabaseError>;

    /// False when no row matched.
    async fn delete(&self, table: &str, id: i64) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
