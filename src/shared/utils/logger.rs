use crate::shared::config::LoggingConfig;
use log::Level;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initialize the logging backend
/// This should be called once at application startup
pub fn init_logger(config: &LoggingConfig) {
    let level = config.level;
    INIT.call_once(|| {
        let initialized = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn) // Default level for dependencies
            .filter_module("bizdesk_lib", level) // Our own components
            .format_timestamp_secs()
            .format_module_path(false)
            .try_init()
            .is_ok();

        if initialized {
            log::info!("Logging system initialized at level {}", level);
        }
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Logger handed to each pipeline component
///
/// Components never log through a global; they receive one of these at
/// construction so tests and embedders can silence or capture output.
pub trait ImportLogger: Send + Sync {
    fn log(&self, level: Level, component: &str, message: &str);

    fn enabled(&self) -> bool {
        true
    }

    fn debug(&self, component: &str, message: &str) {
        self.log(Level::Debug, component, message);
    }

    fn info(&self, component: &str, message: &str) {
        self.log(Level::Info, component, message);
    }

    fn warn(&self, component: &str, message: &str) {
        self.log(Level::Warn, component, message);
    }

    fn error(&self, component: &str, message: &str) {
        self.log(Level::Error, component, message);
    }
}

/// Forwards to the `log` facade under `bizdesk_lib::<component>`
#[derive(Debug, Clone)]
pub struct FacadeLogger {
    enabled: bool,
}

impl FacadeLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &LoggingConfig) -> Arc<dyn ImportLogger> {
        if config.enabled {
            Arc::new(Self::new(true))
        } else {
            Arc::new(NoopLogger)
        }
    }
}

impl ImportLogger for FacadeLogger {
    fn log(&self, level: Level, component: &str, message: &str) {
        if !self.enabled {
            return;
        }
        let target = format!("bizdesk_lib::{}", component);
        log::log!(target: target.as_str(), level, "{}", message);
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl ImportLogger for NoopLogger {
    fn log(&self, _level: Level, _component: &str, _message: &str) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log store operations
    pub fn store_operation(
        logger: &dyn ImportLogger,
        operation: &str,
        target: &str,
        duration_ms: Option<u64>,
    ) {
        match duration_ms {
            Some(duration) => logger.info(
                "store",
                &format!("{} on {} completed in {}ms", operation, target, duration),
            ),
            None => logger.debug("store", &format!("Starting {} on {}", operation, target)),
        }
    }

    /// Log import operations
    pub fn import_progress(logger: &dyn ImportLogger, current: usize, total: usize, label: &str) {
        logger.debug(
            "import",
            &format!("[{}/{}] Processing {}", current, total, label),
        );
    }

    /// Log errors with context
    pub fn error_with_context(
        logger: &dyn ImportLogger,
        error: &dyn std::error::Error,
        context: &str,
    ) {
        logger.error("import", &format!("{}: {}", context, error));
    }

    /// Log performance metrics
    pub fn performance_metric(
        logger: &dyn ImportLogger,
        operation: &str,
        duration_ms: u64,
        additional_info: Option<&str>,
    ) {
        let message = match additional_info {
            Some(info) => format!("{} took {}ms ({})", operation, duration_ms, info),
            None => format!("{} took {}ms", operation, duration_ms),
        };
        logger.debug("performance", &message);
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
    logger: Arc<dyn ImportLogger>,
}

impl TimedOperation {
    pub fn new(logger: Arc<dyn ImportLogger>, operation: &str) -> Self {
        logger.debug("performance", &format!("Starting: {}", operation));
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
            logger,
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(self.logger.as_ref(), &self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(
            self.logger.as_ref(),
            &self.operation,
            duration,
            Some(info),
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_yields_noop_logger() {
        let config = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(!FacadeLogger::from_config(&config).enabled());
        assert!(FacadeLogger::from_config(&LoggingConfig::default()).enabled());
    }

    #[test]
    fn timed_operation_reports_elapsed_time() {
        let timer = TimedOperation::new(Arc::new(NoopLogger), "noop");
        let elapsed = timer.finish_with_info("nothing to do");
        assert!(elapsed < 1_000);
    }
}
