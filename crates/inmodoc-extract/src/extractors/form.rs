use inmodoc_core::{ExtractedFieldResult, ExtractionConfig, ExtractionSource, OcrInput};

use super::accept;
use crate::dictionary::FieldDictionary;
use crate::matcher::find_best_match_with;

/// Matches each detected form key against the dictionary.
///
/// Confidence is the OCR confidence of the pair scaled by label similarity.
/// Keys are visited in sorted order.
#[must_use]
pub fn extract_form_fields(
    input: &OcrInput,
    dictionary: &FieldDictionary,
    config: &ExtractionConfig,
) -> Vec<ExtractedFieldResult> {
    let Some(fields) = &input.detected_fields else {
        return Vec::new();
    };

    fields
        .iter()
        .filter_map(|(label, field)| {
            let hit = find_best_match_with(
                label,
                dictionary,
                config.match_threshold,
                config.containment,
            )?;
            accept(
                hit.mapping,
                &field.text,
                field.confidence * hit.similarity,
                ExtractionSource::Form,
                Some(hit.alias),
            )
        })
        .collect()
}
