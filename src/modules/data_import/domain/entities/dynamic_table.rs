use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::schema::{FieldType, ImportSchema, SchemaField};

/// Column descriptor of a user-defined table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub key: String,
    pub title: String,
    pub width: u32,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub visible: bool,
    pub required: bool,
}

impl TableColumn {
    /// Column seeded from a detected header
    pub fn from_header(header: &str, width: u32) -> Self {
        Self {
            key: column_key(header),
            title: header.trim().to_string(),
            width,
            field_type: FieldType::Text,
            visible: true,
            required: false,
        }
    }

    pub fn to_schema_field(&self) -> SchemaField {
        SchemaField::new(
            self.key.clone(),
            self.title.clone(),
            self.required,
            self.field_type,
            &[],
        )
    }
}

/// Lowercase snake_case key derived from a header, falling back to `column`
pub fn column_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    for ch in header.trim().chars() {
        if ch.is_alphanumeric() {
            key.extend(ch.to_lowercase());
        } else if !key.ends_with('_') && !key.is_empty() {
            key.push('_');
        }
    }
    let key = key.trim_end_matches('_').to_string();
    if key.is_empty() {
        "column".to_string()
    } else {
        key
    }
}

/// One stored row: generated identifier plus field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicTable {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub columns: Vec<TableColumn>,
    #[serde(rename = "rows_data")]
    pub rows_data: Vec<TableRow>,
    /// Bumped by the store on every row write
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DynamicTable {
    pub fn schema(&self) -> ImportSchema {
        ImportSchema::dynamic(
            self.id.clone(),
            self.columns.iter().map(TableColumn::to_schema_field).collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows_data.len()
    }
}

/// Payload for creating a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDynamicTable {
    pub name: String,
    pub description: Option<String>,
    pub columns: Vec<TableColumn>,
}

impl NewDynamicTable {
    /// One visible text column per detected header; duplicate keys get a numeric suffix
    pub fn from_headers(
        name: impl Into<String>,
        description: Option<String>,
        headers: &[String],
        width: u32,
    ) -> Self {
        let mut columns: Vec<TableColumn> = Vec::with_capacity(headers.len());
        for header in headers {
            let mut column = TableColumn::from_header(header, width);
            let base = column.key.clone();
            let mut suffix = 2;
            while columns.iter().any(|c| c.key == column.key) {
                column.key = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            columns.push(column);
        }
        Self {
            name: name.into(),
            description,
            columns,
        }
    }
}

/// Partial metadata update; row data goes through `replace_rows`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub columns: Option<Vec<TableColumn>>,
}
