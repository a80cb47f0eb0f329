pub mod notification_sink;
pub mod preferences_store;
pub mod spreadsheet_parser;

pub use notification_sink::{NotificationLevel, NotificationSink};
pub use preferences_store::PreferencesStore;
pub use spreadsheet_parser::SpreadsheetParser;
