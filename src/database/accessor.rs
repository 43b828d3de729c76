use serde_json::Value;

use super::manager::DatabaseError;
use super::models::Resource;
use super::pagination::{Page, PageWindow};
use super::schema::Record;
use super::store::Store;

/// Count, page, fetch, insert, replace, delete and owner listing for one
/// resource, parameterized by its table, schema and owner column.
pub struct Accessor<'a> {
    resource: &'static Resource,
    store: &'a dyn Store,
    page_size: i64,
}

impl<'a> Accessor<'a> {
    pub fn new(resource: &'static Resource, store: &'a dyn Store, page_size: i64) -> Self {
        Self { resource, store, page_size }
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        self.store.count(self.resource.table).await
    }

    /// Clamp `requested` against the current count and fetch that page.
    ///
    /// The count and the fetch are separate statements, so a concurrent
    /// writer can make them disagree.
    pub async fn page(&self, requested: i64) -> Result<Page, DatabaseError> {
        let count = self.count().await?;
        let window = PageWindow::compute(requested, count, self.page_size);
        let rows = self
            .store
            .select_page(self.resource.table, window.offset, window.page_size)
            .await?;

        Ok(Page {
            rows,
            page: window.page,
            total_pages: window.total_pages,
            page_size: window.page_size,
            count,
        })
    }

    pub async fn all(&self) -> Result<Vec<Record>, DatabaseError> {
        self.store.select_all(self.resource.table).await
    }

    /// Persist the schema fields of `record` and return the stored id.
    pub async fn insert(&self, record: &Record) -> Result<i64, DatabaseError> {
        let clean = self.resource.schema.extract_valid_fields(record);
        self.store.insert(self.resource.table, &clean).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Record>, DatabaseError> {
        self.store.select_by_id(self.resource.table, id).await
    }

    /// Overwrite the schema fields of row `id`. False when the row is absent.
    pub async fn replace_by_id(&self, id: i64, record: &Record) -> Result<bool, DatabaseError> {
        let clean = self.resource.schema.extract_valid_fields(record);
        self.store.update(self.resource.table, id, &clean).await
    }

    /// Overwrite a single schema field of row `id`.
    pub async fn replace_field(&self, id: i64, field: &str, value: Value) -> Result<bool, DatabaseError> {
        if !self.resource.schema.contains(field) {
            return Err(DatabaseError::QueryError(format!(
                "{} is not a field of {}",
                field, self.resource.table
            )));
        }
        let mut record = Record::new();
        record.insert(field.to_string(), value);
        self.store.update(self.resource.table, id, &record).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        self.store.delete(self.resource.table, id).await
    }

    /// Rows whose owner column equals `owner_id`. The owner is not checked
    /// against the user table.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Record>, DatabaseError> {
        let column = self
            .resource
            .owner_column
            .ok_or(DatabaseError::NoOwnerColumn(self.resource.table))?;
        self.store.select_by_column(self.resource.table, column, owner_id).await
    }
}
