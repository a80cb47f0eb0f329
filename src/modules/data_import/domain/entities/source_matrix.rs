use serde::{Deserialize, Serialize};

/// Uniform tabular shape produced from any uploaded file
///
/// Every row has exactly `header.len()` cells and at least one non-empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMatrix {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SourceMatrix {
    /// Build a matrix, padding short rows with empty cells, truncating long
    /// ones, and dropping rows that are entirely empty.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = header.len();
        let rows = rows
            .into_iter()
            .filter(|row| !is_blank_row(row))
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
