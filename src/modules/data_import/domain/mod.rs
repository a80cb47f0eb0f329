pub mod entities;
pub mod repositories;
pub mod services;

// Re-exports for easy access
pub use entities::*;
pub use repositories::{DynamicTableStore, EntityStore};
pub use services::import_components::{
    ColumnMatcher, ImportCommitter, ProgressTracker, RowValidator, TabularParser,
};
