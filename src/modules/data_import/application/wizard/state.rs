use super::step::{ImportMode, WizardStep};
use crate::modules::data_import::domain::entities::{ImportSchema, SourceMatrix};
use crate::modules::data_import::domain::services::import_components::{
    ColumnMapping, ImportResult, ImportTarget, RowValidation, ValidationSummary,
};

/// Everything a wizard session holds between operator actions
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub mode: Option<ImportMode>,
    pub target: Option<ImportTarget>,
    pub schema: Option<ImportSchema>,
    /// Custom-table mode with no table yet; it is created after parsing
    pub new_table_requested: bool,
    pub file_name: Option<String>,
    pub matrix: Option<SourceMatrix>,
    pub mapping: Option<ColumnMapping>,
    pub validations: Vec<RowValidation>,
    pub summary: Option<ValidationSummary>,
    pub result: Option<ImportResult>,
    pub last_error: Option<String>,
}

impl WizardState {
    pub fn clear_upload(&mut self) {
        self.file_name = None;
        self.matrix = None;
        self.mapping = None;
        self.clear_validation();
    }

    pub fn clear_validation(&mut self) {
        self.validations.clear();
        self.summary = None;
    }

    pub fn clear_target(&mut self) {
        self.target = None;
        self.schema = None;
        self.new_table_requested = false;
    }
}
