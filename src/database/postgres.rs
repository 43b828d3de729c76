use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::manager::{quote_identifier, DatabaseError, DatabaseManager};
use super::schema::Record;
use super::store::Store;

/// PostgreSQL store over the shared pool.
///
/// Writes bind the whole record as one `jsonb` parameter and let
/// `jsonb_populate_record` coerce values into the table's column types;
/// reads come back through `row_to_json`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_select(inner: &str) -> String {
        format!("SELECT row_to_json(t)::jsonb AS row FROM ({}) t", inner)
    }

    fn into_records(rows: Vec<Value>) -> Result<Vec<Record>, DatabaseError> {
        rows.into_iter().map(Self::into_record).collect()
    }

    fn into_record(row: Value) -> Result<Record, DatabaseError> {
        match row {
            Value::Object(map) => Ok(map),
            other => Err(DatabaseError::QueryError(format!("unexpected row format: {}", other))),
        }
    }

    fn column_list(record: &Record) -> String {
        record
            .keys()
            .map(|k| quote_identifier(k))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl Store for PgStore {
    async fn count(&self, table: &str) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn select_page(&self, table: &str, offset: i64, limit: i64) -> Result<Vec<Record>, DatabaseError> {
        let sql = Self::row_select(&format!(
            "SELECT * FROM {} ORDER BY \"id\" LIMIT $1 OFFSET $2",
            quote_identifier(table)
        ));
        let rows: Vec<Value> = sqlx::query_scalar(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Self::into_records(rows)
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Record>, DatabaseError> {
        let sql = Self::row_select(&format!("SELECT * FROM {} ORDER BY \"id\"", quote_identifier(table)));
        let rows: Vec<Value> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Self::into_records(rows)
    }

    async fn select_by_id(&self, table: &str, id: i64) -> Result<Option<Record>, DatabaseError> {
        let sql = Self::row_select(&format!("SELECT * FROM {} WHERE \"id\" = $1", quote_identifier(table)));
        let row: Option<Value> = sqlx::query_scalar(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(Self::into_record).transpose()
    }

    async fn select_by_column(&self, table: &str, column: &str, value: i64) -> Result<Vec<Record>, DatabaseError> {
        let sql = Self::row_select(&format!(
            "SELECT * FROM {} WHERE {} = $1 ORDER BY \"id\"",
            quote_identifier(table),
            quote_identifier(column)
        ));
        let rows: Vec<Value> = sqlx::query_scalar(&sql).bind(value).fetch_all(&self.pool).await?;
        Self::into_records(rows)
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<i64, DatabaseError> {
        let table = quote_identifier(table);

        if record.is_empty() {
            let sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING \"id\"", table);
            let id: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
            return Ok(id);
        }

        let columns = Self::column_list(record);
        let sql = format!(
            "INSERT INTO {table} ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1) RETURNING \"id\""
        );
        let id: i64 = sqlx::query_scalar(&sql)
            .bind(Value::Object(record.clone()))
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, table: &str, id: i64, record: &Record) -> Result<bool, DatabaseError> {
        if record.is_empty() {
            return Ok(self.select_by_id(table, id).await?.is_some());
        }

        let table = quote_identifier(table);
        let assignments = record
            .keys()
            .map(|k| {
                let column = quote_identifier(k);
                format!("{column} = source.{column}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {table} AS target SET {assignments} \
             FROM jsonb_populate_record(NULL::{table}, $1) AS source \
             WHERE target.\"id\" = $2"
        );
        let result = sqlx::query(&sql)
            .bind(Value::Object(record.clone()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, table: &str, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE \"id\" = $1", quote_identifier(table));
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
