pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{
    FileKind, ImportMode, ImportService, ImportServiceDeps, UploadedFile, WizardController,
    WizardStep,
};
pub use domain::{DynamicTableStore, EntityStore, FixedEntityKind};

// Re-export common types for shorter imports
pub use domain::services::import_components::types::{
    ColumnMapping, ColumnTarget, ImportResult, ImportTarget, ImportWarning, RowValidation,
    ValidationSummary,
};
