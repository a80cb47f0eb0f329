use std::sync::Arc;

use super::ports::{NotificationSink, PreferencesStore, SpreadsheetParser};
use super::wizard::{WizardComponents, WizardController};
use crate::modules::data_import::domain::repositories::DynamicTableStore;
use crate::modules::data_import::domain::services::import_components::{
    strategy_for, ColumnMatcher, CommitOptions, EntityStores, ImportCommitter, ProgressTracker,
    RowValidator, TabularParser,
};
use crate::shared::config::ImportConfig;
use crate::shared::utils::logger::ImportLogger;

/// External collaborators the import pipeline is wired against
#[derive(Clone)]
pub struct ImportServiceDeps {
    pub entity_stores: EntityStores,
    pub table_store: Arc<dyn DynamicTableStore>,
    pub spreadsheet_parser: Arc<dyn SpreadsheetParser>,
    pub notifications: Arc<dyn NotificationSink>,
    pub preferences: Arc<dyn PreferencesStore>,
    pub logger: Arc<dyn ImportLogger>,
}

/// Import service - Clean interface that hands out wizard sessions
///
/// Components are built once from configuration; each wizard gets its own state.
#[derive(Clone)]
pub struct ImportService {
    components: WizardComponents,
    config: ImportConfig,
}

impl ImportService {
    pub fn new(deps: ImportServiceDeps, config: ImportConfig) -> Self {
        let logger = deps.logger;

        let matcher = ColumnMatcher::new(
            strategy_for(config.match_strategy),
            config.match_threshold,
            logger.clone(),
        );
        let validator = RowValidator::new(config.enforce_dynamic_required, logger.clone());
        let committer = ImportCommitter::new(
            deps.entity_stores,
            deps.table_store.clone(),
            ProgressTracker::new(Some(deps.notifications.clone())),
            CommitOptions::from(&config),
            logger.clone(),
        );

        let components = WizardComponents {
            parser: TabularParser::new(logger.clone()),
            spreadsheet_parser: deps.spreadsheet_parser,
            matcher: Arc::new(matcher),
            validator,
            committer,
            table_store: deps.table_store,
            notifications: deps.notifications,
            preferences: deps.preferences,
            logger,
            default_column_width: config.default_column_width,
        };

        Self { components, config }
    }

    /// Fresh session starting at `SELECT_MODE`
    pub fn new_wizard(&self) -> WizardController {
        WizardController::new(self.components.clone())
    }

    pub fn committer(&self) -> &ImportCommitter {
        &self.components.committer
    }

    pub fn parser(&self) -> &TabularParser {
        &self.components.parser
    }

    pub fn matcher(&self) -> &ColumnMatcher {
        &self.components.matcher
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }
}
