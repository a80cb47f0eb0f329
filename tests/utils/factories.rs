/// Test data factories using builder pattern
///
/// Provides convenient methods to create upload files and seeded tables with sensible defaults
use bizdesk_lib::modules::data_import::{
    application::UploadedFile,
    domain::{
        entities::{DynamicTable, NewDynamicTable, RecordFields, TableRow},
        DynamicTableStore,
    },
};
use std::collections::BTreeMap;

pub struct CsvFactory {
    file_name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Default for CsvFactory {
    fn default() -> Self {
        Self {
            file_name: "import.csv".to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl CsvFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Five clients, the third one missing its name
    pub fn clients() -> Self {
        Self::default()
            .with_file_name("clients.csv")
            .with_headers(&["Customer Name", "E-mail", "Phone", "Favourite Colour"])
            .with_row(&["Ada Lovelace", "ada@example.com", "+44 20 7946 0000", "green"])
            .with_row(&["Grace Hopper", "grace@example.com", "555-0101", "navy"])
            .with_row(&["", "nobody@example.com", "", "grey"])
            .with_row(&["Alan Turing", "alan@example.com", "", ""])
            .with_row(&["Edsger Dijkstra", "", "", "red"])
    }

    /// Every row misses the required name
    pub fn nameless_clients() -> Self {
        Self::default()
            .with_headers(&["Name", "Email"])
            .with_row(&["", "a@example.com"])
            .with_row(&["  ", "b@example.com"])
    }

    pub fn leads() -> Self {
        Self::default()
            .with_file_name("leads.csv")
            .with_headers(&["Lead Name", "Source", "Budget"])
            .with_row(&["Acme", "Referral", "12000"])
            .with_row(&["Globex", "Fair", "3000"])
            .with_row(&["Initech", "Web", ""])
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn with_headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|h| h.to_string()).collect();
        self
    }

    pub fn with_row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn to_csv(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| quote(cell))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn build(&self) -> UploadedFile {
        UploadedFile::delimited(self.file_name.clone(), &self.to_csv())
    }
}

fn quote(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub fn fields(pairs: &[(&str, &str)]) -> RecordFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn rows_of(count: usize, key: &str) -> Vec<RecordFields> {
    (0..count)
        .map(|i| fields(&[(key, &format!("value {}", i + 1))]))
        .collect()
}

/// Create a table from headers and give it `existing_rows` stored rows
pub async fn seed_table(
    store: &dyn DynamicTableStore,
    name: &str,
    headers: &[&str],
    existing_rows: usize,
) -> DynamicTable {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let table = store
        .create(NewDynamicTable::from_headers(name, None, &headers, 150))
        .await
        .expect("table should be created");

    let first_key = table
        .columns
        .first()
        .map(|c| c.key.clone())
        .unwrap_or_else(|| "column".to_string());
    let rows: Vec<TableRow> = (0..existing_rows)
        .map(|i| TableRow {
            id: format!("existing_{}", i),
            values: BTreeMap::from([(first_key.clone(), format!("existing {}", i))]),
        })
        .collect();

    store
        .replace_rows(&table.id, rows, None)
        .await
        .expect("seed rows should be written")
}
