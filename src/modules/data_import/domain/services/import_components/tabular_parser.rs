use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::modules::data_import::domain::entities::source_matrix::is_blank_row;
use crate::modules::data_import::domain::entities::SourceMatrix;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::ImportLogger;

const COMPONENT: &str = "tabular_parser";

/// Declared shape of the uploaded content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceFormat {
    /// Comma-separated text with optional double-quoted fields
    DelimitedText,
    /// JSON `{headers, rows}` produced by the spreadsheet parsing service
    PreParsedJson,
}

/// Output of the external spreadsheet parsing service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetPayload {
    pub headers: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Turns uploaded content into a `SourceMatrix`
#[derive(Clone)]
pub struct TabularParser {
    logger: Arc<dyn ImportLogger>,
}

impl TabularParser {
    pub fn new(logger: Arc<dyn ImportLogger>) -> Self {
        Self { logger }
    }

    pub fn parse(&self, content: &[u8], format: SourceFormat) -> AppResult<SourceMatrix> {
        match format {
            SourceFormat::DelimitedText => {
                let text = std::str::from_utf8(content)?;
                self.parse_delimited(text)
            }
            SourceFormat::PreParsedJson => {
                let payload: SpreadsheetPayload = serde_json::from_slice(content).map_err(|e| {
                    AppError::ParseError(format!("Unreadable spreadsheet payload: {}", e))
                })?;
                self.from_payload(payload)
            }
        }
    }

    /// First non-empty line is the header; the rest are data rows
    pub fn parse_delimited(&self, text: &str) -> AppResult<SourceMatrix> {
        let mut lines = Self::tokenize(text)?.into_iter();
        let header = lines
            .next()
            .ok_or_else(|| AppError::ParseError("File is empty".to_string()))?;
        let matrix = SourceMatrix::new(header, lines.collect());
        self.ensure_rows(matrix)
    }

    /// Flatten `{headers, rows}` by projecting each row object through the header order
    pub fn from_payload(&self, payload: SpreadsheetPayload) -> AppResult<SourceMatrix> {
        if payload.headers.is_empty() || payload.headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AppError::ParseError(
                "Spreadsheet has no header row".to_string(),
            ));
        }

        let rows = payload
            .rows
            .iter()
            .map(|row| {
                payload
                    .headers
                    .iter()
                    .map(|header| cell_to_string(row.get(header)))
                    .collect()
            })
            .collect();

        self.ensure_rows(SourceMatrix::new(payload.headers, rows))
    }

    /// Split text into trimmed cells, honouring double quotes and dropping blank lines
    pub fn tokenize(text: &str) -> AppResult<Vec<Vec<String>>> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let text = strip_delimiter_padding(text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut lines = Vec::new();
        for record in reader.records() {
            let cells: Vec<String> = record?.iter().map(str::to_string).collect();
            if !is_blank_row(&cells) {
                lines.push(cells);
            }
        }
        Ok(lines)
    }

    fn ensure_rows(&self, matrix: SourceMatrix) -> AppResult<SourceMatrix> {
        if matrix.is_empty() {
            self.logger.warn(COMPONENT, "Rejected file with a header but no data rows");
            return Err(AppError::ParseError(
                "No data rows found below the header row".to_string(),
            ));
        }
        self.logger.info(
            COMPONENT,
            &format!(
                "Parsed {} columns and {} data rows",
                matrix.width(),
                matrix.row_count()
            ),
        );
        Ok(matrix)
    }
}

/// Drop spaces and tabs next to delimiters and line breaks outside quotes,
/// so a quote after `, ` still opens a quoted field for the csv reader.
fn strip_delimiter_padding(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;

    for ch in text.chars() {
        if in_quotes {
            out.push(ch);
            if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            ' ' | '\t' => {
                if !at_field_start {
                    pending.push(ch);
                }
            }
            ',' | '\n' | '\r' => {
                pending.clear();
                out.push(ch);
                at_field_start = true;
            }
            _ => {
                out.push_str(&pending);
                pending.clear();
                out.push(ch);
                at_field_start = false;
                if ch == '"' {
                    in_quotes = true;
                }
            }
        }
    }
    out
}

fn cell_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
