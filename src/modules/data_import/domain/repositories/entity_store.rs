use async_trait::async_trait;

use crate::modules::data_import::domain::entities::{
    EntityRecord, FixedEntityKind, RecordFields, RecordFilter,
};
use crate::shared::errors::AppResult;

/// Port (interface) for one built-in entity's store
/// Infrastructure provides the implementation; one instance per entity
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Which entity this store persists
    fn entity(&self) -> FixedEntityKind;

    /// Create a record from field values
    async fn create(&self, fields: RecordFields) -> AppResult<EntityRecord>;

    /// Find a record by ID (`NotFound` when absent)
    async fn get(&self, id: &str) -> AppResult<EntityRecord>;

    /// Merge the given fields into an existing record
    async fn update(&self, id: &str, fields: RecordFields) -> AppResult<EntityRecord>;

    /// List records, optionally filtered by field equality
    async fn list(&self, filter: Option<RecordFilter>) -> AppResult<Vec<EntityRecord>>;
}
