// Shared Kernel: configuration, errors and logging used by every module

pub mod config;
pub mod errors;
pub mod utils;

// Re-exports for convenience
pub use config::{ImportConfig, LoggingConfig, MatchStrategyKind};
pub use errors::{AppError, AppResult};
