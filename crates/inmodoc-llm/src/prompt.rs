//! Prompt text shared by every category call.

use inmodoc_core::OcrInput;

use crate::functions::CategoryFunction;

pub const SYSTEM_PROMPT: &str = "\
You extract structured data from Spanish real-estate documents (listings, \
mandates, cadastral records, energy certificates) that were read by OCR.

Rules:
- Extract only facts explicitly stated in the document. Never infer, guess or \
complete missing data; leave a field null when the document does not state it.
- Spanish numbers use '.' for thousands and ',' for decimals: 150.000,50 € is \
150000.50. Return plain numbers without currency symbols or units.
- Map Spanish terms to the canonical codes offered in each enum, e.g. venta → \
Sale, alquiler → Rent, a estrenar → NewBuild.
- Yes/no features are true only when the document says the property has them \
and false only when it says it lacks them (\"sin ascensor\").
- Report in `confidence` (0-100) how clearly the document states the values.";

/// Builds the user message: the category focus followed by the document.
#[must_use]
pub fn user_prompt(function: &CategoryFunction, input: &OcrInput) -> String {
    let mut prompt = format!(
        "Call {} to extract: {}.\n\nDocument text:\n{}",
        function.name,
        function.description.to_lowercase(),
        input.extracted_text.trim()
    );

    if let Some(fields) = input.detected_fields.as_ref().filter(|f| !f.is_empty()) {
        prompt.push_str("\n\nForm fields detected by OCR:\n");
        for (label, field) in fields {
            prompt.push_str(&format!("- {label}: {}\n", field.text.trim()));
        }
    }
    prompt
}

/// `true` when there is nothing for the model to read.
#[must_use]
pub fn is_blank(input: &OcrInput) -> bool {
    input.extracted_text.trim().is_empty()
        && input
            .detected_fields
            .as_ref()
            .map_or(true, std::collections::BTreeMap::is_empty)
}
