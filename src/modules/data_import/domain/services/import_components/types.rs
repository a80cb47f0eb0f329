use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::modules::data_import::domain::entities::{
    FixedEntityKind, RecordFields, TableColumn, TableRow,
};
use crate::shared::errors::{AppError, AppResult};

// ========================================================================
// COLUMN MAPPING
// ========================================================================

/// Where a source column's values go
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "camelCase")]
pub enum ColumnTarget {
    Field(String),
    Skip,
}

impl ColumnTarget {
    pub fn field_key(&self) -> Option<&str> {
        match self {
            ColumnTarget::Field(key) => Some(key),
            ColumnTarget::Skip => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentOrigin {
    /// A schema field cleared the match threshold
    Matched,
    /// No confident match; the column keeps its own header as field key
    PassThrough,
    /// Set by the operator
    Operator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAssignment {
    pub source_index: usize,
    pub header: String,
    pub target: ColumnTarget,
    /// Best score found (0-100); 0 for operator assignments
    pub score: f64,
    pub origin: AssignmentOrigin,
}

/// Matcher suggestions plus operator overrides, one entry per source column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    suggestions: Vec<ColumnAssignment>,
    overrides: BTreeMap<usize, ColumnTarget>,
}

impl ColumnMapping {
    pub fn from_suggestions(suggestions: Vec<ColumnAssignment>) -> Self {
        Self {
            suggestions,
            overrides: BTreeMap::new(),
        }
    }

    /// Source column `i` goes to the table column created from header `i`
    pub fn from_seeded_columns(headers: &[String], columns: &[TableColumn]) -> Self {
        let suggestions = headers
            .iter()
            .zip(columns)
            .enumerate()
            .map(|(source_index, (header, column))| ColumnAssignment {
                source_index,
                header: header.clone(),
                target: ColumnTarget::Field(column.key.clone()),
                score: 100.0,
                origin: AssignmentOrigin::Matched,
            })
            .collect();
        Self::from_suggestions(suggestions)
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Effective target: the operator's choice if any, else the suggestion
    pub fn target(&self, index: usize) -> Option<&ColumnTarget> {
        self.overrides
            .get(&index)
            .or_else(|| self.suggestions.get(index).map(|s| &s.target))
    }

    pub fn suggestion(&self, index: usize) -> Option<&ColumnAssignment> {
        self.suggestions.get(index)
    }

    pub fn set(&mut self, index: usize, target: ColumnTarget) -> AppResult<()> {
        if index >= self.suggestions.len() {
            return Err(AppError::InvalidInput(format!(
                "Column {} does not exist (file has {} columns)",
                index,
                self.suggestions.len()
            )));
        }
        if let ColumnTarget::Field(key) = &target {
            if key.trim().is_empty() {
                return Err(AppError::InvalidInput(
                    "Target field key cannot be empty".to_string(),
                ));
            }
        }
        self.overrides.insert(index, target);
        Ok(())
    }

    /// Drop the operator's choice so the suggestion applies again
    pub fn clear_override(&mut self, index: usize) -> bool {
        self.overrides.remove(&index).is_some()
    }

    pub fn is_overridden(&self, index: usize) -> bool {
        self.overrides.contains_key(&index)
    }

    /// Effective assignments in source column order
    pub fn assignments(&self) -> Vec<ColumnAssignment> {
        self.suggestions
            .iter()
            .map(|suggestion| match self.overrides.get(&suggestion.source_index) {
                Some(target) => ColumnAssignment {
                    target: target.clone(),
                    score: 0.0,
                    origin: AssignmentOrigin::Operator,
                    ..suggestion.clone()
                },
                None => suggestion.clone(),
            })
            .collect()
    }
}

// ========================================================================
// VALIDATION
// ========================================================================

/// Field key -> cell value for one source row
pub type ValidatedRow = RecordFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Valid,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
    pub status: RowStatus,
    /// Populated only when `status` is `Error`
    pub errors: Vec<String>,
    /// Advisory format notes; never affect `status`
    pub warnings: Vec<String>,
}

impl RowOutcome {
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        let status = if errors.is_empty() {
            RowStatus::Valid
        } else {
            RowStatus::Error
        };
        Self {
            status,
            errors,
            warnings,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == RowStatus::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowValidation {
    pub row_index: usize,
    pub values: ValidatedRow,
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub errors: usize,
    pub with_warnings: usize,
}

impl ValidationSummary {
    pub fn from_rows(rows: &[RowValidation]) -> Self {
        let errors = rows.iter().filter(|r| r.outcome.is_error()).count();
        Self {
            total: rows.len(),
            valid: rows.len() - errors,
            errors,
            with_warnings: rows.iter().filter(|r| !r.outcome.warnings.is_empty()).count(),
        }
    }

    /// Commit is disabled exactly when every row is an error row
    pub fn can_commit(&self) -> bool {
        self.errors != self.total
    }
}

// ========================================================================
// COMMIT
// ========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportTarget {
    FixedEntity {
        entity: FixedEntityKind,
    },
    /// Snapshot taken when the wizard picked the table; the committer re-reads
    #[serde(rename_all = "camelCase")]
    DynamicTable {
        table_id: String,
        existing_columns: Vec<TableColumn>,
        existing_rows: Vec<TableRow>,
    },
}

impl ImportTarget {
    pub fn describe(&self) -> String {
        match self {
            ImportTarget::FixedEntity { entity } => format!("entity '{}'", entity),
            ImportTarget::DynamicTable { table_id, .. } => format!("table '{}'", table_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetail {
    pub row_index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportWarning {
    /// Post-write read returned a different row count than was written
    VerificationMismatch { expected: usize, actual: usize },
    /// Post-write read itself failed
    VerificationUnavailable { reason: String },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::VerificationMismatch { expected, actual } => write!(
                f,
                "Verification mismatch: expected {} rows after import, found {}",
                expected, actual
            ),
            ImportWarning::VerificationUnavailable { reason } => {
                write!(f, "Could not verify the import: {}", reason)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failure_details: Vec<FailureDetail>,
    pub warnings: Vec<ImportWarning>,
    /// IDs of created records or appended rows, in input order
    pub created_ids: Vec<String>,
}

impl ImportResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Whole batch lost to a single fatal error
    pub fn batch_failure(total: usize, message: impl Into<String>) -> Self {
        Self {
            total,
            failed: total,
            failure_details: vec![FailureDetail {
                row_index: 0,
                message: message.into(),
            }],
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, id: String) {
        self.succeeded += 1;
        self.created_ids.push(id);
    }

    pub fn record_failure(&mut self, row_index: usize, message: impl Into<String>) {
        self.failed += 1;
        self.failure_details.push(FailureDetail {
            row_index,
            message: message.into(),
        });
    }

    pub fn has_verification_mismatch(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ImportWarning::VerificationMismatch { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
    pub succeeded: usize,
    pub failed: usize,
    pub label: String,
}
