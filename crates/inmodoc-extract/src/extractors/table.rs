use std::collections::{BTreeMap, HashMap};

use inmodoc_core::{
    BlockType, ExtractedFieldResult, ExtractionConfig, ExtractionSource, OcrInput, TextractBlock,
};

use super::accept;
use crate::dictionary::FieldDictionary;
use crate::matcher::find_best_match_with;

/// Reads key/value pairs out of OCR table cells.
///
/// Cells are grouped per table and row, then paired left to right
/// (column 1 with 2, 3 with 4, ...). Confidence is the weaker of the two cell
/// confidences scaled by label similarity.
#[must_use]
pub fn extract_table_fields(
    input: &OcrInput,
    dictionary: &FieldDictionary,
    config: &ExtractionConfig,
) -> Vec<ExtractedFieldResult> {
    let index = input.block_index();
    let mut results = Vec::new();

    for cells in cell_groups(input, &index) {
        for row in rows(cells).into_values() {
            for pair in row.chunks_exact(2) {
                let (key, value) = (pair[0], pair[1]);
                let label = key.resolved_text(&index);
                let Some(hit) = find_best_match_with(
                    &label,
                    dictionary,
                    config.match_threshold,
                    config.containment,
                ) else {
                    continue;
                };
                let raw = value.resolved_text(&index);
                let cell_confidence = cell_confidence(key, input.confidence)
                    .min(cell_confidence(value, input.confidence));
                results.extend(accept(
                    hit.mapping,
                    &raw,
                    cell_confidence * hit.similarity,
                    ExtractionSource::Table,
                    Some(hit.alias),
                ));
            }
        }
    }

    results
}

/// Cells of each `TABLE` block, in document order. Payloads without table
/// blocks yield all cells as a single group.
fn cell_groups<'a>(
    input: &'a OcrInput,
    index: &HashMap<&str, &'a TextractBlock>,
) -> Vec<Vec<&'a TextractBlock>> {
    let tables: Vec<Vec<&TextractBlock>> = input
        .blocks_of(BlockType::Table)
        .map(|table| {
            table
                .child_ids()
                .filter_map(|id| index.get(id).copied())
                .filter(|b| b.block_type == BlockType::Cell)
                .collect()
        })
        .collect();

    if tables.is_empty() {
        vec![input.blocks_of(BlockType::Cell).collect()]
    } else {
        tables
    }
}

/// Groups cells by row index, each row sorted by column index. Cells without
/// a position are ignored.
fn rows(cells: Vec<&TextractBlock>) -> BTreeMap<u32, Vec<&TextractBlock>> {
    let mut rows: BTreeMap<u32, Vec<&TextractBlock>> = BTreeMap::new();
    for cell in cells {
        if let (Some(row), Some(_)) = (cell.row_index, cell.column_index) {
            rows.entry(row).or_default().push(cell);
        }
    }
    for row in rows.values_mut() {
        row.sort_by_key(|c| c.column_index);
    }
    rows
}

fn cell_confidence(cell: &TextractBlock, fallback: f64) -> f64 {
    cell.confidence.unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use inmodoc_core::{DbTable, FieldValue};

    use super::*;

    const TABLE: &str = r#"{
        "extractedText": "",
        "confidence": 90,
        "blocks": [
            { "Id": "t1", "BlockType": "TABLE",
              "Relationships": [{ "Type": "CHILD", "Ids": ["c1", "c2", "c3", "c4"] }] },
            { "Id": "c2", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2, "Confidence": 85.0,
              "Relationships": [{ "Type": "CHILD", "Ids": ["w2", "w3"] }] },
            { "Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1, "Confidence": 91.0,
              "Relationships": [{ "Type": "CHILD", "Ids": ["w1"] }] },
            { "Id": "c3", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1, "Confidence": 97.0,
              "Text": "Baños" },
            { "Id": "c4", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 2, "Confidence": 96.0,
              "Text": "2" },
            { "Id": "w1", "BlockType": "WORD", "Text": "Superficie" },
            { "Id": "w2", "BlockType": "WORD", "Text": "95" },
            { "Id": "w3", "BlockType": "WORD", "Text": "m²" }
        ]
    }"#;

    #[test]
    fn pairs_adjacent_cells_per_row() {
        let input: OcrInput = serde_json::from_str(TABLE).unwrap();
        let dict = FieldDictionary::spanish_real_estate();
        let results = extract_table_fields(&input, &dict, &ExtractionConfig::default());

        assert_eq!(results.len(), 2);
        let area = &results[0];
        assert_eq!(area.db_table, DbTable::Properties);
        assert_eq!(area.db_column, "squareMeter");
        assert_eq!(area.value, FieldValue::Integer(95));
        assert_eq!(area.original_text, "95 m²");
        assert!(area.confidence <= 85.0);
        assert_eq!(area.extraction_source, ExtractionSource::Table);

        assert_eq!(results[1].db_column, "bathrooms");
        assert_eq!(results[1].value, FieldValue::Integer(2));
    }

    #[test]
    fn loose_cells_without_table_block_are_paired() {
        let json = r#"{
            "blocks": [
                { "Id": "a", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1, "Confidence": 80.0, "Text": "Precio" },
                { "Id": "b", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2, "Confidence": 70.0, "Text": "150.000 €" },
                { "Id": "c", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 3, "Confidence": 99.0, "Text": "Notas" }
            ]
        }"#;
        let input: OcrInput = serde_json::from_str(json).unwrap();
        let dict = FieldDictionary::spanish_real_estate();
        let results = extract_table_fields(&input, &dict, &ExtractionConfig::default());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].db_column, "price");
        assert!((results[0].confidence - 70.0).abs() < f64::EPSILON);
    }
}
