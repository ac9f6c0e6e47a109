//! Wire types for the document-OCR payload handed to the extractors.
//!
//! The payload wrapper is camelCase; blocks keep the OCR service's
//! PascalCase field names so raw responses deserialize unchanged.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// OCR output for a single document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrInput {
    #[serde(default)]
    pub extracted_text: String,
    /// Key/value pairs the OCR service detected as form fields, keyed by label.
    #[serde(default)]
    pub detected_fields: Option<BTreeMap<String, DetectedField>>,
    #[serde(default)]
    pub blocks: Vec<TextractBlock>,
    /// Document-level confidence in `[0, 100]`.
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectedField {
    pub text: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    KeyValueSet,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockRelationship {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextractBlock {
    pub id: String,
    pub block_type: BlockType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub row_index: Option<u32>,
    #[serde(default)]
    pub column_index: Option<u32>,
    #[serde(default)]
    pub relationships: Vec<BlockRelationship>,
}

impl TextractBlock {
    /// Ids of the blocks this block lists under its `CHILD` relationships.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|rel| rel.kind == "CHILD")
            .flat_map(|rel| rel.ids.iter().map(String::as_str))
    }

    /// Text of a block: its own `Text` when present, otherwise the
    /// space-joined text of its `WORD` children.
    #[must_use]
    pub fn resolved_text(&self, index: &HashMap<&str, &TextractBlock>) -> String {
        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            return text.trim().to_string();
        }
        self.child_ids()
            .filter_map(|id| index.get(id))
            .filter(|child| child.block_type == BlockType::Word)
            .filter_map(|child| child.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl OcrInput {
    /// Index of blocks by id, for resolving relationships.
    #[must_use]
    pub fn block_index(&self) -> HashMap<&str, &TextractBlock> {
        self.blocks.iter().map(|b| (b.id.as_str(), b)).collect()
    }

    pub fn blocks_of(&self, kind: BlockType) -> impl Iterator<Item = &TextractBlock> {
        self.blocks.iter().filter(move |b| b.block_type == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "extractedText": "Superficie 95 m²",
        "detectedFields": { "Precio": { "text": "150.000 €", "confidence": 92.5 } },
        "confidence": 88,
        "blocks": [
            { "Id": "t1", "BlockType": "TABLE", "Relationships": [{ "Type": "CHILD", "Ids": ["c1", "c2"] }] },
            { "Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1, "Confidence": 91.0,
              "Relationships": [{ "Type": "CHILD", "Ids": ["w1"] }] },
            { "Id": "c2", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2, "Confidence": 85.0,
              "Relationships": [{ "Type": "CHILD", "Ids": ["w2", "w3"] }] },
            { "Id": "w1", "BlockType": "WORD", "Text": "Superficie" },
            { "Id": "w2", "BlockType": "WORD", "Text": "95" },
            { "Id": "w3", "BlockType": "WORD", "Text": "m²" },
            { "Id": "s1", "BlockType": "SELECTION_ELEMENT" }
        ]
    }"#;

    #[test]
    fn deserializes_ocr_payload() {
        let input: OcrInput = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(input.blocks.len(), 7);
        assert!((input.confidence - 88.0).abs() < f64::EPSILON);
        let fields = input.detected_fields.as_ref().unwrap();
        assert_eq!(fields["Precio"].text, "150.000 €");
        assert_eq!(input.blocks[6].block_type, BlockType::Other);
    }

    #[test]
    fn cell_text_joins_word_children() {
        let input: OcrInput = serde_json::from_str(PAYLOAD).unwrap();
        let index = input.block_index();
        let cells: Vec<_> = input.blocks_of(BlockType::Cell).collect();
        assert_eq!(cells[0].resolved_text(&index), "Superficie");
        assert_eq!(cells[1].resolved_text(&index), "95 m²");
    }

    #[test]
    fn missing_optional_sections_default() {
        let input: OcrInput = serde_json::from_str(r#"{"extractedText": "hola"}"#).unwrap();
        assert!(input.detected_fields.is_none());
        assert!(input.blocks.is_empty());
    }
}
