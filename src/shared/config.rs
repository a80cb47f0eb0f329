/// Runtime configuration for the import pipeline
///
/// Defaults are production values; every field can be overridden from the
/// process environment (a `.env` file is honoured via dotenvy).
use crate::shared::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::str::FromStr;

const ENV_PREFIX: &str = "BIZDESK_";

/// Which similarity strategy the column matcher scores with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategyKind {
    /// Exact / substring / shared-token scoring
    #[default]
    Synonym,
    /// Jaro-Winkler + Levenshtein blend
    Hybrid,
}

impl FromStr for MatchStrategyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synonym" => Ok(MatchStrategyKind::Synonym),
            "hybrid" => Ok(MatchStrategyKind::Hybrid),
            other => Err(AppError::ConfigError(format!(
                "Unknown match strategy '{}' (expected 'synonym' or 'hybrid')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Master switch for the injected pipeline loggers
    pub enabled: bool,
    pub level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: log::LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Minimum score (0-100) a schema field needs to be auto-assigned to a column
    pub match_threshold: f64,
    pub match_strategy: MatchStrategyKind,
    /// Send the revision read at commit time with the row write
    pub optimistic_concurrency: bool,
    /// Re-read the table after the row write and compare counts
    pub verify_after_write: bool,
    /// Apply required-field checks to dynamic table columns
    pub enforce_dynamic_required: bool,
    pub default_column_width: u32,
    pub row_id_prefix: String,
    pub logging: LoggingConfig,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            match_threshold: 60.0,
            match_strategy: MatchStrategyKind::Synonym,
            optimistic_concurrency: true,
            verify_after_write: true,
            enforce_dynamic_required: false,
            default_column_width: 150,
            row_id_prefix: "row".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ImportConfig {
    /// Load defaults, then apply `BIZDESK_*` overrides from the environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        Self::from_vars(&vars)
    }

    /// Build from an explicit variable map (keys carry the `BIZDESK_` prefix)
    pub fn from_vars(vars: &HashMap<String, String>) -> AppResult<Self> {
        let mut config = Self::default();
        let get = |name: &str| vars.get(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = get("MATCH_THRESHOLD") {
            let threshold: f64 = value.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("MATCH_THRESHOLD must be a number, got '{}'", value))
            })?;
            if !(0.0..=100.0).contains(&threshold) {
                return Err(AppError::ConfigError(
                    "MATCH_THRESHOLD must be between 0 and 100".to_string(),
                ));
            }
            config.match_threshold = threshold;
        }
        if let Some(value) = get("MATCH_STRATEGY") {
            config.match_strategy = value.parse()?;
        }
        if let Some(value) = get("OPTIMISTIC_CONCURRENCY") {
            config.optimistic_concurrency = parse_bool("OPTIMISTIC_CONCURRENCY", value)?;
        }
        if let Some(value) = get("VERIFY_AFTER_WRITE") {
            config.verify_after_write = parse_bool("VERIFY_AFTER_WRITE", value)?;
        }
        if let Some(value) = get("ENFORCE_DYNAMIC_REQUIRED") {
            config.enforce_dynamic_required = parse_bool("ENFORCE_DYNAMIC_REQUIRED", value)?;
        }
        if let Some(value) = get("DEFAULT_COLUMN_WIDTH") {
            config.default_column_width = value.trim().parse()?;
        }
        if let Some(value) = get("ROW_ID_PREFIX") {
            if value.trim().is_empty() {
                return Err(AppError::ConfigError("ROW_ID_PREFIX cannot be empty".to_string()));
            }
            config.row_id_prefix = value.trim().to_string();
        }
        if let Some(value) = get("LOG_ENABLED") {
            config.logging.enabled = parse_bool("LOG_ENABLED", value)?;
        }
        if let Some(value) = get("LOG_LEVEL") {
            config.logging.level = value.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("Unknown log level '{}'", value))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            name, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = ImportConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.match_threshold, 60.0);
        assert_eq!(config.match_strategy, MatchStrategyKind::Synonym);
        assert!(config.optimistic_concurrency);
        assert!(config.verify_after_write);
        assert!(!config.enforce_dynamic_required);
        assert!(config.logging.enabled);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ImportConfig::from_vars(&vars(&[
            ("BIZDESK_MATCH_THRESHOLD", "75"),
            ("BIZDESK_MATCH_STRATEGY", "Hybrid"),
            ("BIZDESK_OPTIMISTIC_CONCURRENCY", "off"),
            ("BIZDESK_LOG_ENABLED", "0"),
            ("BIZDESK_LOG_LEVEL", "debug"),
            ("BIZDESK_DEFAULT_COLUMN_WIDTH", "200"),
        ]))
        .unwrap();

        assert_eq!(config.match_threshold, 75.0);
        assert_eq!(config.match_strategy, MatchStrategyKind::Hybrid);
        assert!(!config.optimistic_concurrency);
        assert!(!config.logging.enabled);
        assert_eq!(config.logging.level, log::LevelFilter::Debug);
        assert_eq!(config.default_column_width, 200);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ImportConfig::from_vars(&vars(&[("BIZDESK_MATCH_THRESHOLD", "abc")])),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            ImportConfig::from_vars(&vars(&[("BIZDESK_MATCH_THRESHOLD", "140")])),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            ImportConfig::from_vars(&vars(&[("BIZDESK_VERIFY_AFTER_WRITE", "maybe")])),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            ImportConfig::from_vars(&vars(&[("BIZDESK_MATCH_STRATEGY", "soundex")])),
            Err(AppError::ConfigError(_))
        ));
    }
}
