use serde::{Deserialize, Serialize};

use crate::modules::data_import::domain::services::import_components::types::ImportProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Port for operator-facing messages: transient toasts and a running log
///
/// Write-only; nothing in the pipeline branches on what the sink does.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn append_log(&self, line: &str);

    fn progress(&self, progress: &ImportProgress) {
        self.append_log(&format!(
            "[{}%] {} ({}/{})",
            progress.percentage, progress.label, progress.current, progress.total
        ));
    }
}
