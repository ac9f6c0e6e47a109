//! Keeps one candidate per target field.

use std::collections::HashSet;

use inmodoc_core::ExtractedFieldResult;

/// Keeps the highest-confidence candidate for each `(table, column)` and
/// returns them in descending confidence order.
///
/// The sort is stable, so among equal confidences the candidate that came
/// first in `candidates` wins.
#[must_use]
pub fn consolidate(mut candidates: Vec<ExtractedFieldResult>) -> Vec<ExtractedFieldResult> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert((c.db_table, c.db_column.clone())));
    candidates
}

#[cfg(test)]
mod tests {
    use inmodoc_core::{DataType, DbTable, ExtractionSource, FieldValue};

    use super::*;

    fn candidate(
        table: DbTable,
        column: &str,
        value: i64,
        confidence: f64,
        source: ExtractionSource,
    ) -> ExtractedFieldResult {
        ExtractedFieldResult {
            db_column: column.to_string(),
            db_table: table,
            value: FieldValue::Integer(value),
            original_text: value.to_string(),
            confidence,
            extraction_source: source,
            field_type: DataType::Number,
            matched_alias: None,
        }
    }

    #[test]
    fn keeps_highest_confidence_per_key() {
        let out = consolidate(vec![
            candidate(DbTable::Properties, "bedrooms", 3, 60.0, ExtractionSource::Regex),
            candidate(DbTable::Properties, "bedrooms", 4, 72.0, ExtractionSource::Form),
            candidate(DbTable::Properties, "bathrooms", 2, 80.0, ExtractionSource::Table),
            candidate(DbTable::Properties, "bedrooms", 5, 10.0, ExtractionSource::Text),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].db_column, "bathrooms");
        assert_eq!(out[1].value, FieldValue::Integer(4));
        assert_eq!(out[1].extraction_source, ExtractionSource::Form);
    }

    #[test]
    fn same_column_in_different_tables_is_distinct() {
        let out = consolidate(vec![
            candidate(DbTable::Properties, "notes", 1, 50.0, ExtractionSource::Form),
            candidate(DbTable::Listings, "notes", 2, 50.0, ExtractionSource::Form),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn ties_keep_first_seen() {
        let out = consolidate(vec![
            candidate(DbTable::Properties, "bedrooms", 3, 80.0, ExtractionSource::Form),
            candidate(DbTable::Properties, "bedrooms", 4, 80.0, ExtractionSource::Table),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, FieldValue::Integer(3));
    }

    #[test]
    fn kept_entry_dominates_every_duplicate() {
        let confidences = [12.5, 99.0, 47.0, 99.0, 0.0, 63.2];
        let input: Vec<_> = confidences
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let column = if i % 2 == 0 { "a" } else { "b" };
                candidate(DbTable::Contacts, column, 0, *c, ExtractionSource::Regex)
            })
            .collect();
        let out = consolidate(input.clone());
        for kept in &out {
            for other in input.iter().filter(|c| c.db_column == kept.db_column) {
                assert!(kept.confidence >= other.confidence);
            }
        }
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(consolidate(Vec::new()).is_empty());
    }
}
