use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

use super::progress_tracker::ProgressTracker;
use super::types::{ImportProgress, ImportResult, ImportTarget, ImportWarning, ValidatedRow};
use crate::modules::data_import::domain::entities::{FixedEntityKind, TableRow};
use crate::modules::data_import::domain::repositories::{DynamicTableStore, EntityStore};
use crate::shared::config::ImportConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{ImportLogger, LogContext, TimedOperation};

const COMPONENT: &str = "import_committer";
const ROW_ID_SUFFIX_LEN: usize = 9;

/// Entity stores keyed by the entity they persist
#[derive(Clone, Default)]
pub struct EntityStores {
    stores: HashMap<FixedEntityKind, Arc<dyn EntityStore>>,
}

impl EntityStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, store: Arc<dyn EntityStore>) -> Self {
        self.register(store);
        self
    }

    pub fn register(&mut self, store: Arc<dyn EntityStore>) {
        self.stores.insert(store.entity(), store);
    }

    pub fn get(&self, entity: FixedEntityKind) -> Option<Arc<dyn EntityStore>> {
        self.stores.get(&entity).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct CommitOptions {
    /// Pass the revision read at commit time to the row write
    pub optimistic_concurrency: bool,
    pub verify_after_write: bool,
    pub row_id_prefix: String,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self::from(&ImportConfig::default())
    }
}

impl From<&ImportConfig> for CommitOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            optimistic_concurrency: config.optimistic_concurrency,
            verify_after_write: config.verify_after_write,
            row_id_prefix: config.row_id_prefix.clone(),
        }
    }
}

/// Unique within a batch (index) and across batches (timestamp + random suffix)
pub fn generate_row_id(prefix: &str, index: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ROW_ID_SUFFIX_LEN)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!(
        "{}_{}_{}_{}",
        prefix,
        Utc::now().timestamp_millis(),
        index,
        suffix
    )
}

/// Persists validated rows to a fixed entity store or a dynamic table
#[derive(Clone)]
pub struct ImportCommitter {
    entity_stores: EntityStores,
    table_store: Arc<dyn DynamicTableStore>,
    progress_tracker: ProgressTracker,
    options: CommitOptions,
    logger: Arc<dyn ImportLogger>,
}

impl ImportCommitter {
    pub fn new(
        entity_stores: EntityStores,
        table_store: Arc<dyn DynamicTableStore>,
        progress_tracker: ProgressTracker,
        options: CommitOptions,
        logger: Arc<dyn ImportLogger>,
    ) -> Self {
        Self {
            entity_stores,
            table_store,
            progress_tracker,
            options,
            logger,
        }
    }

    pub async fn commit(
        &self,
        rows: Vec<ValidatedRow>,
        target: &ImportTarget,
    ) -> AppResult<ImportResult> {
        self.logger.info(
            COMPONENT,
            &format!("Committing {} rows to {}", rows.len(), target.describe()),
        );
        match target {
            ImportTarget::FixedEntity { entity } => self.commit_fixed(rows, *entity).await,
            ImportTarget::DynamicTable { table_id, .. } => {
                self.commit_dynamic(rows, table_id).await
            }
        }
    }

    /// One create per row, in order, each awaited; failures are recorded and skipped
    async fn commit_fixed(
        &self,
        rows: Vec<ValidatedRow>,
        entity: FixedEntityKind,
    ) -> AppResult<ImportResult> {
        let timer = TimedOperation::new(self.logger.clone(), "commit_fixed_entity");
        let store = self.entity_stores.get(entity).ok_or_else(|| {
            AppError::CommitError(format!("No store registered for entity '{}'", entity))
        })?;

        let total = rows.len();
        let tracker = self.progress_tracker.clone().with_batch_config(total);
        let mut result = ImportResult::new(total);
        let mut last_emitted_percentage = 0;

        for (index, row) in rows.into_iter().enumerate() {
            LogContext::import_progress(self.logger.as_ref(), index + 1, total, entity.as_str());

            match store.create(row).await {
                Ok(record) => result.record_success(record.id),
                Err(e) => {
                    LogContext::error_with_context(
                        self.logger.as_ref(),
                        &e,
                        &format!("Row {} could not be created", index + 1),
                    );
                    result.record_failure(index, e.to_string());
                }
            }

            let processed = index + 1;
            if tracker.should_emit_progress(
                processed,
                total,
                &mut last_emitted_percentage,
                false,
                processed == total,
            ) {
                tracker.emit_import_progress(ImportProgress {
                    current: processed,
                    total,
                    percentage: ProgressTracker::percentage(processed, total),
                    succeeded: result.succeeded,
                    failed: result.failed,
                    label: format!("Importing {} records", entity),
                });
            }
        }

        timer.finish_with_info(&format!(
            "{} created, {} failed",
            result.succeeded, result.failed
        ));
        Ok(result)
    }

    /// Fresh read, append, whole-collection write, then a read-back count check
    async fn commit_dynamic(
        &self,
        rows: Vec<ValidatedRow>,
        table_id: &str,
    ) -> AppResult<ImportResult> {
        let timer = TimedOperation::new(self.logger.clone(), "commit_dynamic_table");
        let total = rows.len();

        let new_rows: Vec<TableRow> = rows
            .into_iter()
            .enumerate()
            .map(|(index, values)| TableRow {
                id: generate_row_id(&self.options.row_id_prefix, index),
                values,
            })
            .collect();
        let new_ids: Vec<String> = new_rows.iter().map(|row| row.id.clone()).collect();

        LogContext::store_operation(self.logger.as_ref(), "get", table_id, None);
        let read_timer = TimedOperation::new(self.logger.clone(), "get_table");
        let current = self.table_store.get(table_id).await.map_err(|e| {
            AppError::CommitError(format!("Could not read table '{}': {}", table_id, e))
        })?;
        let read_ms = read_timer.finish();
        LogContext::store_operation(self.logger.as_ref(), "get", table_id, Some(read_ms));

        let existing_count = current.rows_data.len();
        let mut merged = current.rows_data;
        merged.extend(new_rows);
        let expected_count = merged.len();
        let expected_revision = self
            .options
            .optimistic_concurrency
            .then_some(current.revision);

        LogContext::store_operation(self.logger.as_ref(), "replace_rows", table_id, None);
        let write_timer = TimedOperation::new(self.logger.clone(), "replace_rows");
        self.table_store
            .replace_rows(table_id, merged, expected_revision)
            .await
            .map_err(|e| match e {
                AppError::Conflict(detail) => AppError::CommitError(format!(
                    "Table '{}' changed while importing; no rows were written ({})",
                    table_id, detail
                )),
                other => AppError::CommitError(format!(
                    "Failed to write rows to table '{}': {}",
                    table_id, other
                )),
            })?;
        let write_ms = write_timer.finish();
        LogContext::store_operation(self.logger.as_ref(), "replace_rows", table_id, Some(write_ms));

        let mut result = ImportResult::new(total);
        for id in new_ids {
            result.record_success(id);
        }

        if self.options.verify_after_write {
            if let Some(warning) = self.verify_row_count(table_id, expected_count).await {
                self.logger.warn(COMPONENT, &warning.to_string());
                result.warnings.push(warning);
            }
        }

        self.progress_tracker.emit_import_progress(ImportProgress {
            current: total,
            total,
            percentage: 100,
            succeeded: result.succeeded,
            failed: result.failed,
            label: format!("Appended rows to table {}", table_id),
        });

        timer.finish_with_info(&format!(
            "{} existing + {} new rows",
            existing_count, total
        ));
        Ok(result)
    }

    async fn verify_row_count(&self, table_id: &str, expected: usize) -> Option<ImportWarning> {
        match self.table_store.get(table_id).await {
            Ok(table) if table.row_count() != expected => {
                Some(ImportWarning::VerificationMismatch {
                    expected,
                    actual: table.row_count(),
                })
            }
            Ok(_) => None,
            Err(e) => Some(ImportWarning::VerificationUnavailable {
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn row_ids_are_unique_within_a_batch() {
        let ids: HashSet<String> = (0..500).map(|i| generate_row_id("row", i)).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn row_ids_are_unique_across_batches_at_the_same_index() {
        let first = generate_row_id("row", 0);
        let second = generate_row_id("row", 0);
        assert_ne!(first, second);
        assert!(first.starts_with("row_"));
    }

    #[test]
    fn options_follow_config() {
        let config = ImportConfig {
            optimistic_concurrency: false,
            row_id_prefix: "lead".into(),
            ..ImportConfig::default()
        };
        let options = CommitOptions::from(&config);
        assert!(!options.optimistic_concurrency);
        assert!(options.verify_after_write);
        assert_eq!(options.row_id_prefix, "lead");
    }
}
