use inmodoc_core::{BlockType, ExtractedFieldResult, ExtractionConfig, ExtractionSource, OcrInput};

use super::accept;
use crate::dictionary::FieldDictionary;
use crate::matcher::find_best_match_with;

/// Reads `label: value` lines the OCR service did not detect as form fields.
///
/// Uses `LINE` blocks when the payload has them, otherwise the lines of the
/// extracted text with the document confidence. Confidence is the line
/// confidence scaled by label similarity and the configured line factor.
#[must_use]
pub fn extract_labelled_lines(
    input: &OcrInput,
    dictionary: &FieldDictionary,
    config: &ExtractionConfig,
) -> Vec<ExtractedFieldResult> {
    let mut lines: Vec<(&str, f64)> = input
        .blocks_of(BlockType::Line)
        .filter_map(|block| {
            let text = block.text.as_deref()?;
            Some((text, block.confidence.unwrap_or(input.confidence)))
        })
        .collect();
    if lines.is_empty() {
        lines = input
            .extracted_text
            .lines()
            .map(|line| (line, input.confidence))
            .collect();
    }

    lines
        .into_iter()
        .filter_map(|(line, line_confidence)| {
            let (label, raw) = split_labelled(line)?;
            let hit = find_best_match_with(
                label,
                dictionary,
                config.match_threshold,
                config.containment,
            )?;
            accept(
                hit.mapping,
                raw,
                line_confidence * hit.similarity * config.line_confidence_factor,
                ExtractionSource::Text,
                Some(hit.alias),
            )
        })
        .collect()
}

/// Splits on the first colon. Labels longer than a few words are prose, not
/// labels, and are ignored.
fn split_labelled(line: &str) -> Option<(&str, &str)> {
    const MAX_LABEL_WORDS: usize = 5;

    let (label, value) = line.split_once(':')?;
    let (label, value) = (label.trim(), value.trim());
    if label.is_empty() || value.is_empty() || label.split_whitespace().count() > MAX_LABEL_WORDS
    {
        return None;
    }
    Some((label, value))
}
