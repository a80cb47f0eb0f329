use async_trait::async_trait;

use crate::modules::data_import::application::ports::SpreadsheetParser;
use crate::modules::data_import::domain::services::import_components::SpreadsheetPayload;
use crate::shared::errors::{AppError, AppResult};

/// Stand-in for the spreadsheet parsing service: the upload already holds its JSON reply
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSpreadsheetParser;

#[async_trait]
impl SpreadsheetParser for JsonSpreadsheetParser {
    async fn parse(&self, file_name: &str, bytes: &[u8]) -> AppResult<SpreadsheetPayload> {
        serde_json::from_slice(bytes).map_err(|e| {
            AppError::ParseError(format!("Spreadsheet '{}' could not be read: {}", file_name, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_payload_json() {
        let bytes = br#"{"headers":["Name"],"rows":[{"Name":"Ana"}]}"#;
        let payload = tokio_test::block_on(JsonSpreadsheetParser.parse("a.xlsx", bytes)).unwrap();
        assert_eq!(payload.headers, vec!["Name"]);
        assert_eq!(payload.rows.len(), 1);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let result = tokio_test::block_on(JsonSpreadsheetParser.parse("a.xlsx", b"\x00\x01"));
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
