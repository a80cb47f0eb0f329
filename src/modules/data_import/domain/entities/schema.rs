use serde::{Deserialize, Serialize};
use std::fmt;

use super::fixed_schemas::FixedEntityKind;

/// Type tag carried by every schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Phone,
    Select,
    Url,
    Textarea,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Email => write!(f, "email"),
            FieldType::Phone => write!(f, "phone"),
            FieldType::Select => write!(f, "select"),
            FieldType::Url => write!(f, "url"),
            FieldType::Textarea => write!(f, "textarea"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub key: String,
    pub label: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Names a source header may use for this field, in match priority order
    pub synonyms: Vec<String>,
}

impl SchemaField {
    /// Build a field whose synonym list always includes its key and label
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        required: bool,
        field_type: FieldType,
        synonyms: &[&str],
    ) -> Self {
        let key = key.into();
        let label = label.into();
        let mut all = Vec::with_capacity(synonyms.len() + 2);
        for candidate in [key.replace('_', " "), label.clone()]
            .into_iter()
            .chain(synonyms.iter().map(|s| s.to_string()))
        {
            if !all
                .iter()
                .any(|existing: &String| existing.eq_ignore_ascii_case(&candidate))
            {
                all.push(candidate);
            }
        }
        Self {
            key,
            label,
            required,
            field_type,
            synonyms: all,
        }
    }

    /// Synthetic field that keeps a source column under its own header text
    pub fn pass_through(header: &str) -> Self {
        Self {
            key: header.to_string(),
            label: header.to_string(),
            required: false,
            field_type: FieldType::Text,
            synonyms: vec![header.to_string()],
        }
    }
}

/// Where the active schema came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaSource {
    Fixed { entity: FixedEntityKind },
    Dynamic { table_id: String },
}

/// Active target schema fed to the matcher and the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSchema {
    pub source: SchemaSource,
    pub fields: Vec<SchemaField>,
}

impl ImportSchema {
    pub fn fixed(entity: FixedEntityKind, fields: Vec<SchemaField>) -> Self {
        Self {
            source: SchemaSource::Fixed { entity },
            fields,
        }
    }

    pub fn dynamic(table_id: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            source: SchemaSource::Dynamic {
                table_id: table_id.into(),
            },
            fields,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.source, SchemaSource::Fixed { .. })
    }

    pub fn field(&self, key: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_label_are_always_synonyms() {
        let field = SchemaField::new("due_date", "Due Date", false, FieldType::Text, &["deadline"]);
        assert_eq!(field.synonyms, vec!["due date", "deadline"]);
    }

    #[test]
    fn pass_through_uses_raw_header() {
        let field = SchemaField::pass_through("Favourite Colour");
        assert_eq!(field.key, "Favourite Colour");
        assert_eq!(field.label, "Favourite Colour");
        assert!(!field.required);
    }
}
