use serde::{Deserialize, Serialize};
use std::fmt;

use crate::modules::data_import::domain::entities::FixedEntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    #[default]
    SelectMode,
    SelectTable,
    Upload,
    Parse,
    NameTable,
    CreateTable,
    Map,
    Validate,
    Import,
    Complete,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::SelectMode => "SELECT_MODE",
            WizardStep::SelectTable => "SELECT_TABLE",
            WizardStep::Upload => "UPLOAD",
            WizardStep::Parse => "PARSE",
            WizardStep::NameTable => "NAME_TABLE",
            WizardStep::CreateTable => "CREATE_TABLE",
            WizardStep::Map => "MAP",
            WizardStep::Validate => "VALIDATE",
            WizardStep::Import => "IMPORT",
            WizardStep::Complete => "COMPLETE",
        }
    }

    /// Steps that run to completion inside a single call can never be left with `back`
    pub fn allows_back(&self) -> bool {
        matches!(
            self,
            WizardStep::SelectTable
                | WizardStep::Upload
                | WizardStep::NameTable
                | WizardStep::Map
                | WizardStep::Validate
        )
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ImportMode {
    FixedEntity { entity: FixedEntityKind },
    CustomTable,
}

impl ImportMode {
    pub fn preference_value(&self) -> &'static str {
        match self {
            ImportMode::FixedEntity { .. } => "fixed",
            ImportMode::CustomTable => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    DelimitedText,
    /// Binary workbook; goes through the spreadsheet parsing service
    Spreadsheet,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Some(FileKind::DelimitedText),
            "xlsx" | "xls" | "ods" => Some(FileKind::Spreadsheet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub kind: FileKind,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, kind: FileKind, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes,
        }
    }

    pub fn delimited(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, FileKind::DelimitedText, text.as_bytes().to_vec())
    }
}
