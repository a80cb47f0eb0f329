pub mod column_matcher;
pub mod import_committer;
pub mod progress_tracker;
pub mod row_validator;
pub mod similarity_strategy;
pub mod tabular_parser;
pub mod types;

// Re-export main types for public API
pub use column_matcher::{ColumnMatcher, DEFAULT_MATCH_THRESHOLD};
pub use import_committer::{generate_row_id, CommitOptions, EntityStores, ImportCommitter};
pub use progress_tracker::ProgressTracker;
pub use row_validator::RowValidator;
pub use similarity_strategy::{strategy_for, HybridStrategy, SimilarityStrategy};
pub use tabular_parser::{SourceFormat, SpreadsheetPayload, TabularParser};
pub use types::*;
