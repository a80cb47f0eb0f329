use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::log_debug;
use crate::modules::data_import::domain::entities::{
    EntityRecord, FixedEntityKind, RecordFields, RecordFilter,
};
use crate::modules::data_import::domain::repositories::EntityStore;
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct StoredRecord {
    sequence: u64,
    record: EntityRecord,
}

/// Process-local store for one fixed entity
#[derive(Debug, Clone)]
pub struct InMemoryEntityStore {
    entity: FixedEntityKind,
    records: Arc<DashMap<String, StoredRecord>>,
    next_sequence: Arc<AtomicU64>,
}

impl InMemoryEntityStore {
    pub fn new(entity: FixedEntityKind) -> Self {
        Self {
            entity,
            records: Arc::new(DashMap::new()),
            next_sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    fn entity(&self) -> FixedEntityKind {
        self.entity
    }

    async fn create(&self, fields: RecordFields) -> AppResult<EntityRecord> {
        let now = Utc::now();
        let record = EntityRecord {
            id: Uuid::new_v4().to_string(),
            entity: self.entity,
            fields,
            created_at: now,
            updated_at: now,
        };
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);

        self.records.insert(
            record.id.clone(),
            StoredRecord {
                sequence,
                record: record.clone(),
            },
        );
        log_debug!("Created {} record {}", self.entity, record.id);
        Ok(record)
    }

    async fn get(&self, id: &str) -> AppResult<EntityRecord> {
        self.records
            .get(id)
            .map(|stored| stored.record.clone())
            .ok_or_else(|| AppError::NotFound(format!("{} record '{}' not found", self.entity, id)))
    }

    async fn update(&self, id: &str, fields: RecordFields) -> AppResult<EntityRecord> {
        let mut stored = self.records.get_mut(id).ok_or_else(|| {
            AppError::NotFound(format!("{} record '{}' not found", self.entity, id))
        })?;
        stored.record.fields.extend(fields);
        stored.record.updated_at = Utc::now();
        Ok(stored.record.clone())
    }

    async fn list(&self, filter: Option<RecordFilter>) -> AppResult<Vec<EntityRecord>> {
        let mut matching: Vec<StoredRecord> = self
            .records
            .iter()
            .filter(|entry| {
                filter
                    .as_ref()
                    .map_or(true, |filter| filter.matches(&entry.record))
            })
            .map(|entry| entry.value().clone())
            .collect();
        matching.sort_by_key(|stored| stored.sequence);
        Ok(matching.into_iter().map(|stored| stored.record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> RecordFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn lists_in_creation_order_with_filter() {
        let store = InMemoryEntityStore::new(FixedEntityKind::Client);
        for (name, status) in [("Ana", "lead"), ("Bo", "active"), ("Cy", "lead")] {
            store
                .create(fields(&[("name", name), ("status", status)]))
                .await
                .unwrap();
        }

        let leads = store
            .list(Some(RecordFilter::default().field("status", "lead")))
            .await
            .unwrap();
        let names: Vec<_> = leads.iter().map(|r| r.fields["name"].as_str()).collect();
        assert_eq!(names, vec!["Ana", "Cy"]);
        assert_eq!(store.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = InMemoryEntityStore::new(FixedEntityKind::Task);
        let created = store.create(fields(&[("title", "Ship")])).await.unwrap();

        let updated = store
            .update(&created.id, fields(&[("status", "done")]))
            .await
            .unwrap();
        assert_eq!(updated.fields.len(), 2);
        assert_eq!(store.get(&created.id).await.unwrap().fields["status"], "done");
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let store = InMemoryEntityStore::new(FixedEntityKind::Invoice);
        assert!(matches!(store.get("nope").await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update("nope", RecordFields::new()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
