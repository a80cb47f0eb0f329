use async_trait::async_trait;

use crate::modules::data_import::domain::services::import_components::tabular_parser::SpreadsheetPayload;
use crate::shared::errors::AppResult;

/// Port for the external service that reads binary spreadsheets
#[async_trait]
pub trait SpreadsheetParser: Send + Sync {
    /// Parse workbook bytes into headers plus header-keyed row objects
    async fn parse(&self, file_name: &str, bytes: &[u8]) -> AppResult<SpreadsheetPayload>;
}
