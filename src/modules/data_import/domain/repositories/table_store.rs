use async_trait::async_trait;

use crate::modules::data_import::domain::entities::{
    DynamicTable, NewDynamicTable, TableRow, TableUpdate,
};
use crate::shared::errors::AppResult;

/// Port (interface) for user-defined tables and their stored rows
#[async_trait]
pub trait DynamicTableStore: Send + Sync {
    /// Create a table with no rows
    async fn create(&self, table: NewDynamicTable) -> AppResult<DynamicTable>;

    /// Fetch the current persisted table (`NotFound` when absent)
    async fn get(&self, id: &str) -> AppResult<DynamicTable>;

    /// Update name, description or columns
    async fn update(&self, id: &str, update: TableUpdate) -> AppResult<DynamicTable>;

    /// Replace the whole row collection in one write
    ///
    /// When `expected_revision` is given and differs from the stored revision the
    /// write is rejected with `Conflict`. `None` means last writer wins.
    async fn replace_rows(
        &self,
        id: &str,
        rows: Vec<TableRow>,
        expected_revision: Option<u64>,
    ) -> AppResult<DynamicTable>;

    async fn list(&self) -> AppResult<Vec<DynamicTable>>;
}
