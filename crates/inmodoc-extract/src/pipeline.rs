//! Rule-based extraction: every extractor, then consolidation.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use inmodoc_core::{CompleteExtractedData, ExtractedFieldResult, ExtractionConfig, OcrInput};

use crate::consolidate::consolidate;
use crate::dictionary::FieldDictionary;
use crate::extractors::{
    extract_form_fields, extract_labelled_lines, extract_table_fields, extract_text_patterns,
};

/// Result of one extraction run.
///
/// Serializes as
/// `{ extractedFields, propertyData, listingData, contactData, completeData }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionOutput {
    /// Consolidated results, highest confidence first.
    pub extracted_fields: Vec<ExtractedFieldResult>,
    pub complete_data: CompleteExtractedData,
}

impl ExtractionOutput {
    /// Consolidates candidates from any mix of sources and drops the ones
    /// below `min_confidence`.
    #[must_use]
    pub fn from_candidates(candidates: Vec<ExtractedFieldResult>, min_confidence: f64) -> Self {
        let candidate_count = candidates.len();
        let mut extracted_fields = consolidate(candidates);
        extracted_fields.retain(|r| r.confidence >= min_confidence);

        tracing::debug!(
            candidates = candidate_count,
            kept = extracted_fields.len(),
            min_confidence,
            "consolidated extraction candidates"
        );

        let complete_data = CompleteExtractedData::from_results(&extracted_fields);
        Self {
            extracted_fields,
            complete_data,
        }
    }
}

impl Serialize for ExtractionOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("ExtractionOutput", 5)?;
        out.serialize_field("extractedFields", &self.extracted_fields)?;
        out.serialize_field("propertyData", &self.complete_data.property)?;
        out.serialize_field("listingData", &self.complete_data.listing)?;
        out.serialize_field("contactData", &self.complete_data.contact)?;
        out.serialize_field("completeData", &self.complete_data)?;
        out.end()
    }
}

/// Runs the form, pattern, table and line extractors and concatenates their
/// candidates without consolidating.
#[must_use]
pub fn collect_candidates(
    input: &OcrInput,
    dictionary: &FieldDictionary,
    config: &ExtractionConfig,
) -> Vec<ExtractedFieldResult> {
    let form = extract_form_fields(input, dictionary, config);
    let regex = extract_text_patterns(input, dictionary, config);
    let table = extract_table_fields(input, dictionary, config);
    let lines = extract_labelled_lines(input, dictionary, config);

    tracing::debug!(
        form = form.len(),
        regex = regex.len(),
        table = table.len(),
        lines = lines.len(),
        "rule-based candidates"
    );

    [form, regex, table, lines].concat()
}

/// Rule-based extraction of one OCR payload.
#[must_use]
pub fn extract_fields(
    input: &OcrInput,
    dictionary: &FieldDictionary,
    config: &ExtractionConfig,
) -> ExtractionOutput {
    let output = ExtractionOutput::from_candidates(
        collect_candidates(input, dictionary, config),
        config.min_confidence,
    );
    tracing::info!(
        fields = output.extracted_fields.len(),
        "rule-based extraction complete"
    );
    output
}
