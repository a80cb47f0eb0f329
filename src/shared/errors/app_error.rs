use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Commit error: {0}")]
    CommitError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot {action} while in step {step}")]
    InvalidTransition { step: String, action: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn invalid_transition(step: impl std::fmt::Display, action: &str) -> Self {
        AppError::InvalidTransition {
            step: step.to_string(),
            action: action.to_string(),
        }
    }

    /// Fatal errors abort the current pipeline attempt instead of being collected
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::ParseError(_) | AppError::CommitError(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => AppError::ParseError(format!("line {}: {}", pos.line(), err)),
            None => AppError::ParseError(err.to_string()),
        }
    }
}

impl From<std::str::Utf8Error> for AppError {
    fn from(err: std::str::Utf8Error) -> Self {
        AppError::ParseError(format!("File is not valid UTF-8 text: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ConfigError(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_commit_errors_are_fatal() {
        assert!(AppError::ParseError("empty".into()).is_fatal());
        assert!(AppError::CommitError("write failed".into()).is_fatal());
        assert!(!AppError::StoreError("timeout".into()).is_fatal());
        assert!(!AppError::Conflict("stale".into()).is_fatal());
    }

    #[test]
    fn invalid_transition_message_names_step_and_action() {
        let err = AppError::invalid_transition("MAP", "commit");
        assert_eq!(err.to_string(), "Cannot commit while in step MAP");
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(AppError::NotFound("table t1".into())).unwrap();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "table t1");
    }
}
