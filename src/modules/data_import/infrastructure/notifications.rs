use std::sync::{Mutex, MutexGuard};

use crate::modules::data_import::application::ports::{NotificationLevel, NotificationSink};
use crate::{log_error, log_info, log_warn};

/// Forwards notifications and log lines to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info | NotificationLevel::Success => log_info!("{}", message),
            NotificationLevel::Warning => log_warn!("{}", message),
            NotificationLevel::Error => log_error!("{}", message),
        }
    }

    fn append_log(&self, line: &str) {
        log_info!("[import log] {}", line);
    }
}

/// Keeps everything it receives so a UI (or a test) can render it later
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    notifications: Mutex<Vec<(NotificationLevel, String)>>,
    log_lines: Mutex<Vec<String>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<(NotificationLevel, String)> {
        lock(&self.notifications).clone()
    }

    pub fn log_lines(&self) -> Vec<String> {
        lock(&self.log_lines).clone()
    }

    pub fn has_notification(&self, level: NotificationLevel) -> bool {
        lock(&self.notifications).iter().any(|(l, _)| *l == level)
    }

    pub fn clear(&self) {
        lock(&self.notifications).clear();
        lock(&self.log_lines).clear();
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, level: NotificationLevel, message: &str) {
        lock(&self.notifications).push((level, message.to_string()));
    }

    fn append_log(&self, line: &str) {
        lock(&self.log_lines).push(line.to_string());
    }
}

// a panic while holding the lock leaves the data usable
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_arrival_order() {
        let sink = RecordingNotificationSink::new();
        sink.append_log("first");
        sink.notify(NotificationLevel::Error, "boom");
        sink.append_log("second");

        assert_eq!(sink.log_lines(), vec!["first", "second"]);
        assert!(sink.has_notification(NotificationLevel::Error));
        assert!(!sink.has_notification(NotificationLevel::Success));

        sink.clear();
        assert!(sink.notifications().is_empty());
    }
}
