use std::sync::Arc;

use super::similarity_strategy::{SimilarityStrategy, SynonymOverlapStrategy};
use super::types::{AssignmentOrigin, ColumnAssignment, ColumnMapping, ColumnTarget};
use crate::modules::data_import::domain::entities::SchemaField;
use crate::shared::utils::logger::ImportLogger;

const COMPONENT: &str = "column_matcher";
pub const DEFAULT_MATCH_THRESHOLD: f64 = 60.0;

/// Suggests a target field for every source column
///
/// Pure function of `(headers, schema)`: the same input always yields the same mapping.
pub struct ColumnMatcher {
    strategy: Box<dyn SimilarityStrategy>,
    threshold: f64,
    logger: Arc<dyn ImportLogger>,
}

impl ColumnMatcher {
    pub fn new(
        strategy: Box<dyn SimilarityStrategy>,
        threshold: f64,
        logger: Arc<dyn ImportLogger>,
    ) -> Self {
        Self {
            strategy,
            threshold,
            logger,
        }
    }

    pub fn with_defaults(logger: Arc<dyn ImportLogger>) -> Self {
        Self::new(Box::new(SynonymOverlapStrategy), DEFAULT_MATCH_THRESHOLD, logger)
    }

    pub fn match_columns(&self, headers: &[String], schema: &[SchemaField]) -> ColumnMapping {
        let suggestions = headers
            .iter()
            .enumerate()
            .map(|(index, header)| self.match_header(index, header, schema))
            .collect();
        ColumnMapping::from_suggestions(suggestions)
    }

    fn match_header(&self, index: usize, header: &str, schema: &[SchemaField]) -> ColumnAssignment {
        let mut best: Option<(&SchemaField, f64)> = None;

        for field in schema {
            let field_score = self.best_synonym_score(header, field);
            // strictly greater: earlier fields win ties
            if best.map_or(true, |(_, score)| field_score > score) {
                best = Some((field, field_score));
            }
        }

        match best {
            Some((field, score)) if score >= self.threshold => {
                self.logger.debug(
                    COMPONENT,
                    &format!(
                        "'{}' -> '{}' ({:.1}, {})",
                        header,
                        field.key,
                        score,
                        self.strategy.name()
                    ),
                );
                ColumnAssignment {
                    source_index: index,
                    header: header.to_string(),
                    target: ColumnTarget::Field(field.key.clone()),
                    score,
                    origin: AssignmentOrigin::Matched,
                }
            }
            best => {
                let score = best.map_or(0.0, |(_, score)| score);
                self.logger.debug(
                    COMPONENT,
                    &format!("'{}' kept as its own field (best score {:.1})", header, score),
                );
                ColumnAssignment {
                    source_index: index,
                    header: header.to_string(),
                    target: ColumnTarget::Field(header.to_string()),
                    score,
                    origin: AssignmentOrigin::PassThrough,
                }
            }
        }
    }

    fn best_synonym_score(&self, header: &str, field: &SchemaField) -> f64 {
        field
            .synonyms
            .iter()
            .map(|synonym| self.strategy.score(header, synonym))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::data_import::domain::entities::{FieldType, FixedEntityKind};
    use crate::modules::data_import::domain::services::import_components::similarity_strategy::HybridStrategy;
    use crate::shared::utils::logger::NoopLogger;

    fn matcher() -> ColumnMatcher {
        ColumnMatcher::with_defaults(Arc::new(NoopLogger))
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn keys(mapping: &ColumnMapping) -> Vec<Option<String>> {
        (0..mapping.len())
            .map(|i| mapping.target(i).and_then(|t| t.field_key()).map(str::to_string))
            .collect()
    }

    #[test]
    fn maps_client_headers_onto_schema() {
        let schema = FixedEntityKind::Client.schema();
        let mapping = matcher().match_columns(
            &headers(&["Customer Name", "E-mail", "Mobile", "Web Site"]),
            &schema.fields,
        );
        assert_eq!(
            keys(&mapping),
            vec![
                Some("name".to_string()),
                Some("email".to_string()),
                Some("phone".to_string()),
                Some("website".to_string()),
            ]
        );
    }

    #[test]
    fn unmatched_header_passes_through() {
        let schema = FixedEntityKind::Client.schema();
        let mapping = matcher().match_columns(&headers(&["Favourite Colour"]), &schema.fields);
        let assignment = mapping.suggestion(0).unwrap();
        assert_eq!(assignment.target, ColumnTarget::Field("Favourite Colour".into()));
        assert_eq!(assignment.origin, AssignmentOrigin::PassThrough);
        assert_eq!(assignment.score, 0.0);
    }

    #[test]
    fn exact_match_beats_substring_match() {
        let schema = vec![
            SchemaField::new("contact", "Contact", false, FieldType::Text, &["email contact"]),
            SchemaField::new("email", "Email", false, FieldType::Email, &[]),
        ];
        let mapping = matcher().match_columns(&headers(&["EMAIL"]), &schema);
        assert_eq!(mapping.target(0), Some(&ColumnTarget::Field("email".into())));
        assert_eq!(mapping.suggestion(0).unwrap().score, 100.0);
    }

    #[test]
    fn ties_go_to_first_declared_field() {
        let schema = vec![
            SchemaField::new("primary", "Primary", false, FieldType::Text, &["contact"]),
            SchemaField::new("secondary", "Secondary", false, FieldType::Text, &["contact"]),
        ];
        let mapping = matcher().match_columns(&headers(&["Contact"]), &schema);
        assert_eq!(mapping.target(0), Some(&ColumnTarget::Field("primary".into())));
    }

    #[test]
    fn below_threshold_partial_overlap_passes_through() {
        let schema = vec![SchemaField::new(
            "due_date",
            "Due Date",
            false,
            FieldType::Text,
            &[],
        )];
        // shares one token of two: 30 < 60
        let mapping = matcher().match_columns(&headers(&["date paid"]), &schema);
        assert_eq!(mapping.target(0), Some(&ColumnTarget::Field("date paid".into())));
    }

    #[test]
    fn matching_is_deterministic() {
        let schema = FixedEntityKind::Invoice.schema();
        let input = headers(&["Invoice #", "Customer", "Total", "Memo", "Something Else"]);
        let first = matcher().match_columns(&input, &schema.fields);
        let second = matcher().match_columns(&input, &schema.fields);
        assert_eq!(first, second);
    }

    #[test]
    fn never_suggests_skip() {
        let schema = FixedEntityKind::Task.schema();
        let mapping = matcher().match_columns(&headers(&["", "zzz", "Owner"]), &schema.fields);
        for i in 0..mapping.len() {
            assert_ne!(mapping.target(i), Some(&ColumnTarget::Skip));
        }
    }

    #[test]
    fn hybrid_strategy_tolerates_typos() {
        let matcher = ColumnMatcher::new(
            Box::new(HybridStrategy::default_hybrid()),
            85.0,
            Arc::new(NoopLogger),
        );
        let schema = FixedEntityKind::Client.schema();
        let mapping = matcher.match_columns(&headers(&["Adress"]), &schema.fields);
        assert_eq!(mapping.target(0), Some(&ColumnTarget::Field("address".into())));
    }
}
