use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::fixed_schemas::FixedEntityKind;

/// Field values keyed by schema field key
pub type RecordFields = BTreeMap<String, String>;

/// A persisted fixed-entity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: String,
    pub entity: FixedEntityKind,
    pub fields: RecordFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equality filter for `EntityStore::list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub equals: RecordFields,
}

impl RecordFilter {
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.equals.insert(key.into(), value.into());
        self
    }

    pub fn matches(&self, record: &EntityRecord) -> bool {
        self.equals
            .iter()
            .all(|(key, value)| record.fields.get(key) == Some(value))
    }
}
