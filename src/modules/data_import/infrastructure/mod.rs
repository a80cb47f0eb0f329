pub mod memory;
pub mod notifications;
pub mod spreadsheet;

pub use memory::{InMemoryEntityStore, InMemoryPreferences, InMemoryTableStore};
pub use notifications::{LogNotificationSink, RecordingNotificationSink};
pub use spreadsheet::JsonSpreadsheetParser;
