pub mod logger;
pub mod validation;

pub use logger::{FacadeLogger, ImportLogger, LogContext, NoopLogger, TimedOperation};
pub use validation::Validator;
