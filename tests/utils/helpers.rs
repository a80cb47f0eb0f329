/// Test helper functions and service builders
use bizdesk_lib::modules::data_import::{
    application::{
        ports::{NotificationLevel, NotificationSink, PreferencesStore},
        ImportService, ImportServiceDeps,
    },
    domain::{
        services::import_components::{
            CommitOptions, EntityStores, ImportCommitter, ImportProgress, ProgressTracker,
        },
        DynamicTableStore, EntityStore, FixedEntityKind,
    },
    infrastructure::{
        InMemoryEntityStore, InMemoryPreferences, InMemoryTableStore, JsonSpreadsheetParser,
        RecordingNotificationSink,
    },
};
use bizdesk_lib::shared::config::{ImportConfig, LoggingConfig};
use bizdesk_lib::shared::utils::{ImportLogger, NoopLogger};
use std::sync::{Arc, Mutex};

pub struct TestServices {
    pub import_service: ImportService,
    pub client_store: Arc<InMemoryEntityStore>,
    pub task_store: Arc<InMemoryEntityStore>,
    pub table_store: Arc<InMemoryTableStore>,
    pub notifications: Arc<RecordingNotificationSink>,
    pub preferences: Arc<InMemoryPreferences>,
}

/// Quiet config with defaults otherwise
pub fn test_config() -> ImportConfig {
    ImportConfig {
        logging: LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        },
        ..ImportConfig::default()
    }
}

/// Build all services needed for integration tests
pub fn build_test_services() -> TestServices {
    build_test_services_with(test_config())
}

pub fn build_test_services_with(config: ImportConfig) -> TestServices {
    build_test_services_sharing(config, Arc::new(InMemoryPreferences::new()))
}

/// Same as `build_test_services` but reusing an existing preferences store
pub fn build_test_services_sharing(
    config: ImportConfig,
    preferences: Arc<InMemoryPreferences>,
) -> TestServices {
    let client_store = Arc::new(InMemoryEntityStore::new(FixedEntityKind::Client));
    let task_store = Arc::new(InMemoryEntityStore::new(FixedEntityKind::Task));
    let table_store = Arc::new(InMemoryTableStore::new());
    let notifications = Arc::new(RecordingNotificationSink::new());

    let entity_stores = EntityStores::new()
        .with(client_store.clone())
        .with(task_store.clone());

    let deps = ImportServiceDeps {
        entity_stores,
        table_store: table_store.clone(),
        spreadsheet_parser: Arc::new(JsonSpreadsheetParser),
        notifications: notifications.clone(),
        preferences: preferences.clone() as Arc<dyn PreferencesStore>,
        logger: Arc::new(NoopLogger),
    };

    TestServices {
        import_service: ImportService::new(deps, config),
        client_store,
        task_store,
        table_store,
        notifications,
        preferences,
    }
}

/// Committer wired straight to the given stores, reporting progress into `sink`
pub fn build_committer(
    entity_store: Option<Arc<dyn EntityStore>>,
    table_store: Arc<dyn DynamicTableStore>,
    options: CommitOptions,
    sink: Option<Arc<dyn NotificationSink>>,
) -> ImportCommitter {
    let mut entity_stores = EntityStores::new();
    if let Some(store) = entity_store {
        entity_stores.register(store);
    }
    build_committer_logged(entity_stores, table_store, options, sink, Arc::new(NoopLogger))
}

pub fn build_committer_logged(
    entity_stores: EntityStores,
    table_store: Arc<dyn DynamicTableStore>,
    options: CommitOptions,
    sink: Option<Arc<dyn NotificationSink>>,
    logger: Arc<dyn ImportLogger>,
) -> ImportCommitter {
    ImportCommitter::new(
        entity_stores,
        table_store,
        ProgressTracker::new(sink),
        options,
        logger,
    )
}

/// Keeps every logged line as `component: message`
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ImportLogger for RecordingLogger {
    fn log(&self, _level: log::Level, component: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{}: {}", component, message));
    }
}

/// Captures every progress event for ordering assertions
#[derive(Default)]
pub struct ProgressCapture {
    events: Mutex<Vec<ImportProgress>>,
}

impl ProgressCapture {
    pub fn events(&self) -> Vec<ImportProgress> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationSink for ProgressCapture {
    fn notify(&self, _level: NotificationLevel, _message: &str) {}

    fn append_log(&self, _line: &str) {}

    fn progress(&self, progress: &ImportProgress) {
        self.events.lock().unwrap().push(progress.clone());
    }
}
