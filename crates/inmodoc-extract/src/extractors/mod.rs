//! The independent extraction passes over one OCR payload.
//!
//! Every extractor is a pure function of the payload, the dictionary and the
//! extraction config. Candidates that fail validation or conversion are
//! logged at debug level and dropped.

mod form;
mod lines;
mod table;
mod text;

pub use form::extract_form_fields;
pub use lines::extract_labelled_lines;
pub use table::extract_table_fields;
pub use text::{extract_text_patterns, PatternRule, PATTERN_RULES};

use inmodoc_core::{ExtractedFieldResult, ExtractionSource};

use crate::dictionary::FieldMapping;

/// Converts `raw` for `mapping`, or logs why it could not.
fn accept(
    mapping: &FieldMapping,
    raw: &str,
    confidence: f64,
    source: ExtractionSource,
    matched_alias: Option<&str>,
) -> Option<ExtractedFieldResult> {
    match mapping.candidate(raw, confidence, source, matched_alias) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::debug!(source = ?source, error = %e, "skipping candidate");
            None
        }
    }
}
