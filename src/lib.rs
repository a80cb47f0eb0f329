pub mod modules;
pub mod shared;

use modules::data_import::{
    application::{ports::NotificationSink, ImportService, ImportServiceDeps},
    domain::{services::import_components::EntityStores, FixedEntityKind},
    infrastructure::{
        InMemoryEntityStore, InMemoryPreferences, InMemoryTableStore, JsonSpreadsheetParser,
        LogNotificationSink,
    },
};
use shared::{
    config::ImportConfig,
    errors::AppResult,
    utils::{logger::init_logger, FacadeLogger},
};
use std::sync::Arc;

/// Build an import service from the environment with in-process stores
pub fn bootstrap() -> AppResult<ImportService> {
    let config = ImportConfig::from_env()?;
    Ok(bootstrap_with(config, Arc::new(LogNotificationSink)))
}

/// Same wiring as `bootstrap` with explicit config and notification sink
pub fn bootstrap_with(
    config: ImportConfig,
    notifications: Arc<dyn NotificationSink>,
) -> ImportService {
    init_logger(&config.logging);
    let logger = FacadeLogger::from_config(&config.logging);

    let entity_stores = FixedEntityKind::ALL
        .into_iter()
        .fold(EntityStores::new(), |stores, entity| {
            stores.with(Arc::new(InMemoryEntityStore::new(entity)))
        });

    let deps = ImportServiceDeps {
        entity_stores,
        table_store: Arc::new(InMemoryTableStore::new()),
        spreadsheet_parser: Arc::new(JsonSpreadsheetParser),
        notifications,
        preferences: Arc::new(InMemoryPreferences::new()),
        logger,
    };

    log_info!(
        "Import pipeline ready (strategy {:?}, threshold {})",
        config.match_strategy,
        config.match_threshold
    );
    ImportService::new(deps, config)
}
