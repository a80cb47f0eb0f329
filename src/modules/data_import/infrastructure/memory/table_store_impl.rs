use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::log_debug;
use crate::modules::data_import::domain::entities::{
    DynamicTable, NewDynamicTable, TableRow, TableUpdate,
};
use crate::modules::data_import::domain::repositories::DynamicTableStore;
use crate::shared::errors::{AppError, AppResult};

/// Process-local dynamic table store with a per-table row revision
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableStore {
    tables: Arc<DashMap<String, DynamicTable>>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("Table '{}' not found", id))
    }
}

#[async_trait]
impl DynamicTableStore for InMemoryTableStore {
    async fn create(&self, table: NewDynamicTable) -> AppResult<DynamicTable> {
        let now = Utc::now();
        let created = DynamicTable {
            id: Uuid::new_v4().to_string(),
            name: table.name,
            description: table.description,
            columns: table.columns,
            rows_data: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        };
        self.tables.insert(created.id.clone(), created.clone());
        log_debug!("Created table {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn get(&self, id: &str) -> AppResult<DynamicTable> {
        self.tables
            .get(id)
            .map(|table| table.value().clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn update(&self, id: &str, update: TableUpdate) -> AppResult<DynamicTable> {
        let mut table = self.tables.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        if let Some(name) = update.name {
            table.name = name;
        }
        if let Some(description) = update.description {
            table.description = Some(description);
        }
        if let Some(columns) = update.columns {
            table.columns = columns;
        }
        table.updated_at = Utc::now();
        Ok(table.clone())
    }

    async fn replace_rows(
        &self,
        id: &str,
        rows: Vec<TableRow>,
        expected_revision: Option<u64>,
    ) -> AppResult<DynamicTable> {
        let mut table = self.tables.get_mut(id).ok_or_else(|| Self::not_found(id))?;

        if let Some(expected) = expected_revision {
            if table.revision != expected {
                return Err(AppError::Conflict(format!(
                    "expected revision {}, found {}",
                    expected, table.revision
                )));
            }
        }

        table.rows_data = rows;
        table.revision += 1;
        table.updated_at = Utc::now();
        log_debug!(
            "Table {} now holds {} rows (revision {})",
            id,
            table.rows_data.len(),
            table.revision
        );
        Ok(table.clone())
    }

    async fn list(&self) -> AppResult<Vec<DynamicTable>> {
        let mut tables: Vec<DynamicTable> =
            self.tables.iter().map(|entry| entry.value().clone()).collect();
        tables.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> TableRow {
        TableRow {
            id: id.to_string(),
            values: Default::default(),
        }
    }

    async fn empty_table(store: &InMemoryTableStore) -> DynamicTable {
        store
            .create(NewDynamicTable::from_headers("Leads", None, &["Name".to_string()], 150))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn replace_rows_bumps_revision() {
        let store = InMemoryTableStore::new();
        let table = empty_table(&store).await;
        assert_eq!(table.revision, 0);

        let written = store
            .replace_rows(&table.id, vec![row("a"), row("b")], Some(0))
            .await
            .unwrap();
        assert_eq!(written.revision, 1);
        assert_eq!(store.get(&table.id).await.unwrap().row_count(), 2);
    }

    #[tokio::test]
    async fn stale_revision_is_rejected_without_writing() {
        let store = InMemoryTableStore::new();
        let table = empty_table(&store).await;
        store.replace_rows(&table.id, vec![row("a")], Some(0)).await.unwrap();

        let stale = store.replace_rows(&table.id, vec![row("b")], Some(0)).await;
        assert!(matches!(stale, Err(AppError::Conflict(_))));
        assert_eq!(store.get(&table.id).await.unwrap().rows_data, vec![row("a")]);
    }

    #[tokio::test]
    async fn unchecked_write_always_wins() {
        let store = InMemoryTableStore::new();
        let table = empty_table(&store).await;
        store.replace_rows(&table.id, vec![row("a")], None).await.unwrap();
        store.replace_rows(&table.id, vec![row("b")], None).await.unwrap();
        assert_eq!(store.get(&table.id).await.unwrap().rows_data, vec![row("b")]);
    }

    #[tokio::test]
    async fn metadata_update_keeps_rows() {
        let store = InMemoryTableStore::new();
        let table = empty_table(&store).await;
        store.replace_rows(&table.id, vec![row("a")], None).await.unwrap();

        let updated = store
            .update(
                &table.id,
                TableUpdate {
                    name: Some("Prospects".into()),
                    ..TableUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Prospects");
        assert_eq!(updated.row_count(), 1);
        assert!(matches!(store.get("missing").await, Err(AppError::NotFound(_))));
    }
}
