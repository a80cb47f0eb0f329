use std::sync::Arc;

use super::types::{ColumnMapping, ColumnTarget, RowOutcome, RowValidation, ValidatedRow};
use crate::modules::data_import::domain::entities::{FieldType, ImportSchema};
use crate::shared::utils::logger::ImportLogger;
use crate::shared::utils::Validator;

const COMPONENT: &str = "row_validator";

/// Classifies every row as valid or error without dropping any
#[derive(Clone)]
pub struct RowValidator {
    enforce_dynamic_required: bool,
    logger: Arc<dyn ImportLogger>,
}

impl RowValidator {
    pub fn new(enforce_dynamic_required: bool, logger: Arc<dyn ImportLogger>) -> Self {
        Self {
            enforce_dynamic_required,
            logger,
        }
    }

    pub fn validate(
        &self,
        rows: &[Vec<String>],
        mapping: &ColumnMapping,
        schema: &ImportSchema,
    ) -> Vec<RowValidation> {
        let check_required = schema.is_fixed() || self.enforce_dynamic_required;

        let results: Vec<RowValidation> = rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let values = Self::apply_mapping(row, mapping);
                let errors = if check_required {
                    Self::missing_required(&values, schema)
                } else {
                    Vec::new()
                };
                let warnings = Self::format_warnings(&values, schema);
                RowValidation {
                    row_index,
                    values,
                    outcome: RowOutcome::from_findings(errors, warnings),
                }
            })
            .collect();

        let error_rows = results.iter().filter(|r| r.outcome.is_error()).count();
        self.logger.info(
            COMPONENT,
            &format!(
                "Validated {} rows: {} valid, {} with errors",
                results.len(),
                results.len() - error_rows,
                error_rows
            ),
        );
        results
    }

    /// Key each non-skipped cell by its target field; missing cells become empty strings.
    /// Columns passed through under a blank header have no key and are left out.
    pub fn apply_mapping(row: &[String], mapping: &ColumnMapping) -> ValidatedRow {
        let mut values = ValidatedRow::new();
        for index in 0..mapping.len() {
            if let Some(ColumnTarget::Field(key)) = mapping.target(index) {
                if key.trim().is_empty() {
                    continue;
                }
                let cell = row.get(index).cloned().unwrap_or_default();
                values.insert(key.clone(), cell);
            }
        }
        values
    }

    fn missing_required(values: &ValidatedRow, schema: &ImportSchema) -> Vec<String> {
        schema
            .required_fields()
            .filter(|field| {
                values
                    .get(&field.key)
                    .map_or(true, |value| value.trim().is_empty())
            })
            .map(|field| format!("Missing required field: {}", field.label))
            .collect()
    }

    fn format_warnings(values: &ValidatedRow, schema: &ImportSchema) -> Vec<String> {
        let mut warnings = Vec::new();
        for field in &schema.fields {
            let Some(value) = values.get(&field.key) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            let looks_right = match field.field_type {
                FieldType::Email => Validator::is_valid_email(value),
                FieldType::Phone => Validator::is_valid_phone(value),
                FieldType::Url => Validator::is_valid_url(value),
                FieldType::Text | FieldType::Select | FieldType::Textarea => true,
            };
            if !looks_right {
                warnings.push(format!(
                    "{} '{}' does not look like a valid {}",
                    field.label, value, field.field_type
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::data_import::domain::entities::{FixedEntityKind, SchemaField};
    use crate::modules::data_import::domain::services::import_components::column_matcher::ColumnMatcher;
    use crate::modules::data_import::domain::services::import_components::types::RowStatus;
    use crate::shared::utils::logger::NoopLogger;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn client_setup(headers: &[&str]) -> (ColumnMapping, ImportSchema) {
        let schema = FixedEntityKind::Client.schema();
        let mapping = ColumnMatcher::with_defaults(Arc::new(NoopLogger))
            .match_columns(&row(headers), &schema.fields);
        (mapping, schema)
    }

    fn validator() -> RowValidator {
        RowValidator::new(false, Arc::new(NoopLogger))
    }

    #[test]
    fn flags_rows_missing_required_fields() {
        let (mapping, schema) = client_setup(&["Name", "Email"]);
        let rows = vec![row(&["Ana", "ana@x.io"]), row(&["  ", "bo@x.io"]), row(&["Cy", ""])];

        let results = validator().validate(&rows, &mapping, &schema);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].outcome.status, RowStatus::Valid);
        assert_eq!(results[1].outcome.status, RowStatus::Error);
        assert_eq!(results[1].outcome.errors, vec!["Missing required field: Name"]);
        assert_eq!(results[2].outcome.status, RowStatus::Valid);
    }

    #[test]
    fn blank_header_column_is_left_out_of_the_record() {
        let (mapping, _) = client_setup(&["Name", ""]);
        let values = RowValidator::apply_mapping(&row(&["Ana", "stray"]), &mapping);
        assert_eq!(values.len(), 1);
        assert_eq!(values["name"], "Ana");
    }

    #[test]
    fn unmapped_required_field_is_an_error_on_every_row() {
        let (mapping, schema) = client_setup(&["Email"]);
        let rows = vec![row(&["ana@x.io"])];
        let results = validator().validate(&rows, &mapping, &schema);
        assert!(results[0].outcome.is_error());
    }

    #[test]
    fn skipped_columns_are_omitted() {
        let (mut mapping, schema) = client_setup(&["Name", "Email", "Colour"]);
        mapping.set(2, ColumnTarget::Skip).unwrap();
        let results = validator().validate(&[row(&["Ana", "ana@x.io", "red"])], &mapping, &schema);
        let values = &results[0].values;
        assert_eq!(values.len(), 2);
        assert!(!values.contains_key("Colour"));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let (mapping, _) = client_setup(&["Name", "Email"]);
        let values = RowValidator::apply_mapping(&row(&["Ana"]), &mapping);
        assert_eq!(values.get("email").map(String::as_str), Some(""));
    }

    #[test]
    fn outcome_does_not_depend_on_other_rows() {
        let (mapping, schema) = client_setup(&["Name"]);
        let alone = validator().validate(&[row(&[""])], &mapping, &schema);
        let mixed = validator().validate(&[row(&["Ana"]), row(&[""])], &mapping, &schema);
        assert_eq!(alone[0].outcome, mixed[1].outcome);
    }

    #[test]
    fn format_problems_are_warnings_only() {
        let (mapping, schema) = client_setup(&["Name", "Email", "Phone"]);
        let results =
            validator().validate(&[row(&["Ana", "not-an-email", "call me"])], &mapping, &schema);
        let outcome = &results[0].outcome;
        assert_eq!(outcome.status, RowStatus::Valid);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[test]
    fn dynamic_required_columns_are_not_enforced_by_default() {
        let schema = ImportSchema::dynamic(
            "t1",
            vec![SchemaField::new("sku", "SKU", true, FieldType::Text, &[])],
        );
        let mapping = ColumnMatcher::with_defaults(Arc::new(NoopLogger))
            .match_columns(&row(&["SKU"]), &schema.fields);
        let rows = vec![row(&[""])];

        let lenient = validator().validate(&rows, &mapping, &schema);
        assert!(!lenient[0].outcome.is_error());

        let strict = RowValidator::new(true, Arc::new(NoopLogger)).validate(&rows, &mapping, &schema);
        assert!(strict[0].outcome.is_error());
    }
}
