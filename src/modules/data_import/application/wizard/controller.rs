use std::sync::Arc;

use super::state::WizardState;
use super::step::{FileKind, ImportMode, UploadedFile, WizardStep};
use crate::modules::data_import::application::ports::{
    NotificationLevel, NotificationSink, PreferencesStore, SpreadsheetParser,
};
use crate::modules::data_import::domain::entities::{
    DynamicTable, FixedEntityKind, ImportSchema, NewDynamicTable, SourceMatrix,
};
use crate::modules::data_import::domain::repositories::DynamicTableStore;
use crate::modules::data_import::domain::services::import_components::{
    ColumnMapping, ColumnMatcher, ColumnTarget, ImportCommitter, ImportResult, ImportTarget,
    RowValidation, RowValidator, SourceFormat, TabularParser, ValidationSummary,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::ImportLogger;
use crate::shared::utils::Validator;

const COMPONENT: &str = "import_wizard";
pub const MODE_PREFERENCE_KEY: &str = "import.last_mode";
pub const ENTITY_PREFERENCE_KEY: &str = "import.last_entity";

/// Collaborators shared by every wizard session
#[derive(Clone)]
pub struct WizardComponents {
    pub parser: TabularParser,
    pub spreadsheet_parser: Arc<dyn SpreadsheetParser>,
    pub matcher: Arc<ColumnMatcher>,
    pub validator: RowValidator,
    pub committer: ImportCommitter,
    pub table_store: Arc<dyn DynamicTableStore>,
    pub notifications: Arc<dyn NotificationSink>,
    pub preferences: Arc<dyn PreferencesStore>,
    pub logger: Arc<dyn ImportLogger>,
    pub default_column_width: u32,
}

/// One import session: select a target, upload, map, validate, commit
///
/// Every action checks the current step and fails with `InvalidTransition`
/// without touching state when it does not apply.
pub struct WizardController {
    components: WizardComponents,
    state: WizardState,
}

impl WizardController {
    pub fn new(components: WizardComponents) -> Self {
        Self {
            components,
            state: WizardState::default(),
        }
    }

    // ========================================================================
    // TARGET SELECTION
    // ========================================================================

    pub fn choose_mode(&mut self, mode: ImportMode) -> AppResult<()> {
        self.require(WizardStep::SelectMode, "choose an import mode")?;

        let preferences = &self.components.preferences;
        preferences.set(MODE_PREFERENCE_KEY, mode.preference_value());

        match mode {
            ImportMode::FixedEntity { entity } => {
                preferences.set(ENTITY_PREFERENCE_KEY, entity.as_str());
                self.state.target = Some(ImportTarget::FixedEntity { entity });
                self.state.schema = Some(entity.schema());
                self.state.step = WizardStep::Upload;
            }
            ImportMode::CustomTable => {
                self.state.step = WizardStep::SelectTable;
            }
        }
        self.state.mode = Some(mode);
        self.log(&format!("Mode selected: {:?}", mode));
        Ok(())
    }

    /// Mode chosen in the previous session, if the preferences still hold one
    pub fn remembered_mode(&self) -> Option<ImportMode> {
        let preferences = &self.components.preferences;
        match preferences.get(MODE_PREFERENCE_KEY)?.as_str() {
            "fixed" => {
                let entity = preferences
                    .get(ENTITY_PREFERENCE_KEY)
                    .and_then(|value| value.parse::<FixedEntityKind>().ok())
                    .unwrap_or(FixedEntityKind::Client);
                Some(ImportMode::FixedEntity { entity })
            }
            "custom" => Some(ImportMode::CustomTable),
            _ => None,
        }
    }

    pub async fn available_tables(&self) -> AppResult<Vec<DynamicTable>> {
        self.components.table_store.list().await
    }

    pub async fn select_existing_table(&mut self, table_id: &str) -> AppResult<()> {
        self.require(WizardStep::SelectTable, "select a table")?;

        let table = match self.components.table_store.get(table_id).await {
            Ok(table) => table,
            Err(e) => {
                self.report_error(&format!("Could not open table: {}", e));
                return Err(e);
            }
        };

        self.log(&format!(
            "Importing into existing table '{}' ({} rows)",
            table.name,
            table.row_count()
        ));
        self.set_table_target(table);
        self.state.step = WizardStep::Upload;
        Ok(())
    }

    /// The table itself is created after a file is parsed, from its header row
    pub fn request_new_table(&mut self) -> AppResult<()> {
        self.require(WizardStep::SelectTable, "create a new table")?;
        self.state.new_table_requested = true;
        self.state.step = WizardStep::Upload;
        self.log("New table requested; waiting for a file to take columns from");
        Ok(())
    }

    // ========================================================================
    // UPLOAD AND PARSE
    // ========================================================================

    /// Parse the file; on failure the wizard stays on `UPLOAD` with no matrix kept
    pub async fn upload(&mut self, file: UploadedFile) -> AppResult<()> {
        self.require(WizardStep::Upload, "upload a file")?;

        self.state.clear_upload();
        self.state.last_error = None;
        self.state.step = WizardStep::Parse;
        self.log(&format!("Parsing '{}'", file.name));

        let matrix = match self.parse_file(&file).await {
            Ok(matrix) => matrix,
            Err(e) => {
                self.state.step = WizardStep::Upload;
                self.report_error(&format!("Could not read '{}': {}", file.name, e));
                return Err(e);
            }
        };

        self.notify(
            NotificationLevel::Success,
            &format!(
                "Read {} rows and {} columns from '{}'",
                matrix.row_count(),
                matrix.width(),
                file.name
            ),
        );
        self.state.file_name = Some(file.name);
        self.state.matrix = Some(matrix);

        if self.state.new_table_requested {
            self.state.step = WizardStep::NameTable;
        } else {
            self.seed_mapping()?;
            self.state.step = WizardStep::Map;
        }
        Ok(())
    }

    async fn parse_file(&self, file: &UploadedFile) -> AppResult<SourceMatrix> {
        let parser = &self.components.parser;
        match file.kind {
            FileKind::DelimitedText => parser.parse(&file.bytes, SourceFormat::DelimitedText),
            FileKind::Spreadsheet => {
                let payload = self
                    .components
                    .spreadsheet_parser
                    .parse(&file.name, &file.bytes)
                    .await?;
                parser.from_payload(payload)
            }
        }
    }

    // ========================================================================
    // NEW TABLE
    // ========================================================================

    /// Create the requested table with one column per detected header, then map
    pub async fn name_table(&mut self, name: &str, description: Option<String>) -> AppResult<()> {
        self.require(WizardStep::NameTable, "name the new table")?;
        Validator::validate_table_name(name)?;

        let headers = self
            .state
            .matrix
            .as_ref()
            .map(|matrix| matrix.header().to_vec())
            .ok_or_else(|| AppError::InvalidInput("No parsed file to take columns from".into()))?;

        self.state.step = WizardStep::CreateTable;
        let new_table = NewDynamicTable::from_headers(
            name.trim(),
            description,
            &headers,
            self.components.default_column_width,
        );

        let table = match self.components.table_store.create(new_table).await {
            Ok(table) => table,
            Err(e) => {
                self.state.step = WizardStep::NameTable;
                self.report_error(&format!("Could not create table '{}': {}", name.trim(), e));
                return Err(e);
            }
        };

        self.notify(
            NotificationLevel::Success,
            &format!("Created table '{}' with {} columns", table.name, table.columns.len()),
        );
        self.state.mapping = Some(ColumnMapping::from_seeded_columns(&headers, &table.columns));
        self.set_table_target(table);
        self.state.new_table_requested = false;
        self.state.step = WizardStep::Map;
        Ok(())
    }

    // ========================================================================
    // MAPPING
    // ========================================================================

    pub fn set_mapping(&mut self, source_index: usize, target: ColumnTarget) -> AppResult<()> {
        self.require(WizardStep::Map, "change the column mapping")?;
        self.mapping_mut()?.set(source_index, target)
    }

    /// Drop an operator override so the suggestion applies again
    pub fn clear_mapping_override(&mut self, source_index: usize) -> AppResult<bool> {
        self.require(WizardStep::Map, "change the column mapping")?;
        Ok(self.mapping_mut()?.clear_override(source_index))
    }

    fn seed_mapping(&mut self) -> AppResult<()> {
        let (Some(matrix), Some(schema)) = (&self.state.matrix, &self.state.schema) else {
            return Err(AppError::InvalidInput(
                "Mapping needs both a parsed file and a target schema".into(),
            ));
        };
        let mapping = self
            .components
            .matcher
            .match_columns(matrix.header(), &schema.fields);
        self.state.mapping = Some(mapping);
        Ok(())
    }

    fn mapping_mut(&mut self) -> AppResult<&mut ColumnMapping> {
        self.state
            .mapping
            .as_mut()
            .ok_or_else(|| AppError::InvalidInput("No column mapping yet".into()))
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Recompute every row outcome from scratch and move to `VALIDATE`
    pub fn validate(&mut self) -> AppResult<ValidationSummary> {
        if !matches!(self.state.step, WizardStep::Map | WizardStep::Validate) {
            return Err(AppError::invalid_transition(self.state.step, "validate rows"));
        }

        let (Some(matrix), Some(mapping), Some(schema)) =
            (&self.state.matrix, &self.state.mapping, &self.state.schema)
        else {
            return Err(AppError::InvalidInput("Nothing to validate".into()));
        };

        let validations = self
            .components
            .validator
            .validate(matrix.rows(), mapping, schema);
        let summary = ValidationSummary::from_rows(&validations);

        self.log(&format!(
            "Validation: {} rows, {} valid, {} with errors, {} with warnings",
            summary.total, summary.valid, summary.errors, summary.with_warnings
        ));
        if !summary.can_commit() {
            self.notify(
                NotificationLevel::Warning,
                "Every row has errors; adjust the mapping or the file before importing",
            );
        }

        self.state.validations = validations;
        self.state.summary = Some(summary);
        self.state.step = WizardStep::Validate;
        Ok(summary)
    }

    /// Disabled exactly when every validated row is an error row
    pub fn can_commit(&self) -> bool {
        self.state.step == WizardStep::Validate
            && self.state.summary.is_some_and(|summary| summary.can_commit())
    }

    // ========================================================================
    // COMMIT
    // ========================================================================

    /// Persist every validated row, error rows included, then move to `COMPLETE`
    ///
    /// A fatal commit error still completes the wizard with a whole-batch
    /// failure result and is returned to the caller.
    pub async fn commit(&mut self) -> AppResult<ImportResult> {
        self.require(WizardStep::Validate, "import rows")?;
        if !self.can_commit() {
            return Err(AppError::ValidationError(
                "Every row has errors; nothing can be imported".into(),
            ));
        }
        let target = self
            .state
            .target
            .clone()
            .ok_or_else(|| AppError::InvalidInput("No import target selected".into()))?;

        let rows: Vec<_> = self
            .state
            .validations
            .iter()
            .map(|validation| validation.values.clone())
            .collect();
        let total = rows.len();

        self.state.step = WizardStep::Import;
        self.log(&format!("Importing {} rows into {}", total, target.describe()));

        let outcome = self.components.committer.commit(rows, &target).await;
        self.state.step = WizardStep::Complete;

        match outcome {
            Ok(result) => {
                self.report_result(&result);
                self.state.result = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                self.report_error(&format!("Import failed: {}", e));
                self.state.result = Some(ImportResult::batch_failure(total, e.to_string()));
                Err(e)
            }
        }
    }

    fn report_result(&self, result: &ImportResult) {
        for failure in &result.failure_details {
            self.log(&format!("Row {} failed: {}", failure.row_index + 1, failure.message));
        }
        for warning in &result.warnings {
            self.log(&format!("Warning: {}", warning));
        }

        let level = if result.failed > 0 || !result.warnings.is_empty() {
            NotificationLevel::Warning
        } else {
            NotificationLevel::Success
        };
        self.notify(
            level,
            &format!(
                "Imported {} of {} rows ({} failed)",
                result.succeeded, result.total, result.failed
            ),
        );
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    /// Step back one screen, dropping whatever the current step produced
    ///
    /// A table created by `name_table` already exists in the store, so going
    /// back from `MAP` keeps it as the target; the next upload maps onto it.
    pub fn back(&mut self) -> AppResult<()> {
        let step = self.state.step;
        if !step.allows_back() {
            return Err(AppError::invalid_transition(step, "go back"));
        }

        self.state.last_error = None;
        self.state.step = match step {
            WizardStep::SelectTable => {
                self.state.mode = None;
                WizardStep::SelectMode
            }
            WizardStep::Upload => {
                self.state.clear_upload();
                self.state.clear_target();
                match self.state.mode {
                    Some(ImportMode::CustomTable) => WizardStep::SelectTable,
                    _ => {
                        self.state.mode = None;
                        WizardStep::SelectMode
                    }
                }
            }
            WizardStep::NameTable | WizardStep::Map => {
                self.state.clear_upload();
                WizardStep::Upload
            }
            WizardStep::Validate => {
                self.state.clear_validation();
                WizardStep::Map
            }
            other => return Err(AppError::invalid_transition(other, "go back")),
        };
        self.log(&format!("Back from {} to {}", step, self.state.step));
        Ok(())
    }

    /// Drop all session state and start over at `SELECT_MODE`
    pub fn reset(&mut self) {
        self.state = WizardState::default();
        self.components.logger.debug(COMPONENT, "Wizard reset");
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn mode(&self) -> Option<ImportMode> {
        self.state.mode
    }

    pub fn target(&self) -> Option<&ImportTarget> {
        self.state.target.as_ref()
    }

    pub fn schema(&self) -> Option<&ImportSchema> {
        self.state.schema.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.state.file_name.as_deref()
    }

    pub fn matrix(&self) -> Option<&SourceMatrix> {
        self.state.matrix.as_ref()
    }

    pub fn mapping(&self) -> Option<&ColumnMapping> {
        self.state.mapping.as_ref()
    }

    pub fn validations(&self) -> &[RowValidation] {
        &self.state.validations
    }

    pub fn summary(&self) -> Option<ValidationSummary> {
        self.state.summary
    }

    pub fn result(&self) -> Option<&ImportResult> {
        self.state.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn require(&self, expected: WizardStep, action: &str) -> AppResult<()> {
        if self.state.step == expected {
            Ok(())
        } else {
            Err(AppError::invalid_transition(self.state.step, action))
        }
    }

    fn set_table_target(&mut self, table: DynamicTable) {
        self.state.schema = Some(table.schema());
        self.state.target = Some(ImportTarget::DynamicTable {
            table_id: table.id,
            existing_columns: table.columns,
            existing_rows: table.rows_data,
        });
    }

    fn log(&self, line: &str) {
        self.components.logger.info(COMPONENT, line);
        self.components.notifications.append_log(line);
    }

    fn notify(&self, level: NotificationLevel, message: &str) {
        self.components.notifications.notify(level, message);
        self.components.notifications.append_log(message);
    }

    fn report_error(&mut self, message: &str) {
        self.components.logger.error(COMPONENT, message);
        self.notify(NotificationLevel::Error, message);
        self.state.last_error = Some(message.to_string());
    }
}
