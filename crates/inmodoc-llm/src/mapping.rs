//! Maps function-call arguments back onto dictionary fields.

use inmodoc_core::{DbTable, ExtractedFieldResult, ExtractionSource};
use inmodoc_extract::FieldDictionary;
use serde_json::{Map, Value};

use crate::functions::{CategoryFunction, ParamTarget, CONFIDENCE_PARAM};

/// Splits a full name on whitespace: the first token is the given name and
/// the rest, if any, the surnames. Compound given names ("María José") end
/// up split wrongly.
#[must_use]
pub fn split_full_name(full: &str) -> Option<(String, Option<String>)> {
    let mut tokens = full.split_whitespace();
    let first = tokens.next()?.to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    Some((first, (!rest.is_empty()).then_some(rest)))
}

/// Confidence of an LLM-extracted field: the model's own score, damped by
/// the OCR confidence of the document it read.
#[must_use]
pub fn llm_confidence(model_confidence: f64, ocr_confidence: f64) -> f64 {
    let c = model_confidence.clamp(0.0, 100.0);
    c.min(c * ocr_confidence / 100.0)
}

/// Converts one function call's arguments into candidate results.
///
/// Null and unknown arguments are ignored; values rejected by the field's
/// validation or converter are logged and dropped.
#[must_use]
pub fn map_arguments(
    function: &CategoryFunction,
    arguments: &Map<String, Value>,
    dictionary: &FieldDictionary,
    ocr_confidence: f64,
    default_confidence: f64,
) -> Vec<ExtractedFieldResult> {
    let model_confidence = arguments
        .get(CONFIDENCE_PARAM)
        .and_then(Value::as_f64)
        .unwrap_or(default_confidence);
    let confidence = llm_confidence(model_confidence, ocr_confidence);

    let mut results = Vec::new();
    for (name, value) in arguments {
        if name == CONFIDENCE_PARAM {
            continue;
        }
        let Some(raw) = raw_text(value) else {
            continue;
        };
        let Some(param) = function.param(name) else {
            tracing::debug!(function = function.name, argument = %name, "ignoring unknown argument");
            continue;
        };

        match param.target {
            ParamTarget::Field { table, column } => {
                results.extend(candidate(dictionary, table, column, &raw, confidence));
            }
            ParamTarget::FullName => {
                let Some((first, last)) = split_full_name(&raw) else {
                    continue;
                };
                results.extend(candidate(
                    dictionary,
                    DbTable::Contacts,
                    "firstName",
                    &first,
                    confidence,
                ));
                if let Some(last) = last {
                    results.extend(candidate(
                        dictionary,
                        DbTable::Contacts,
                        "lastName",
                        &last,
                        confidence,
                    ));
                }
            }
        }
    }
    results
}

fn candidate(
    dictionary: &FieldDictionary,
    table: DbTable,
    column: &str,
    raw: &str,
    confidence: f64,
) -> Option<ExtractedFieldResult> {
    let Some(mapping) = dictionary.get(table, column) else {
        tracing::debug!(%table, column, "argument target not in dictionary");
        return None;
    };
    mapping
        .candidate(raw, confidence, ExtractionSource::Gpt4Ocr, None)
        .map_err(|e| tracing::debug!(error = %e, "skipping LLM field"))
        .ok()
}

/// Renders a JSON argument as the raw text the converters expect.
///
/// Fractional numbers use a decimal comma so `1500.125` is not read as a
/// thousands group.
fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string().replace('.', ",")),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use inmodoc_core::FieldValue;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::functions::category_functions;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn function(name: &str) -> CategoryFunction {
        category_functions()
            .into_iter()
            .find(|f| f.name == name)
            .unwrap()
    }

    #[test]
    fn split_full_name_first_token_and_rest() {
        assert_eq!(
            split_full_name("Juan García López"),
            Some(("Juan".to_string(), Some("García López".to_string())))
        );
        assert_eq!(split_full_name("  Ana "), Some(("Ana".to_string(), None)));
        assert_eq!(split_full_name("   "), None);
    }

    #[test]
    fn confidence_is_damped_by_ocr() {
        assert!((llm_confidence(80.0, 90.0) - 72.0).abs() < 1e-9);
        assert!((llm_confidence(80.0, 100.0) - 80.0).abs() < 1e-9);
        assert!((llm_confidence(150.0, 100.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn maps_owner_name_to_first_and_last_name() {
        let dict = FieldDictionary::spanish_real_estate();
        let results = map_arguments(
            &function("extract_contact_info"),
            &args(json!({ "owner_name": "Juan García López", "confidence": 90 })),
            &dict,
            100.0,
            75.0,
        );
        let first = results.iter().find(|r| r.db_column == "firstName").unwrap();
        let last = results.iter().find(|r| r.db_column == "lastName").unwrap();
        assert_eq!(first.value, FieldValue::Text("Juan".to_string()));
        assert_eq!(last.value, FieldValue::Text("García López".to_string()));
        assert_eq!(first.extraction_source, ExtractionSource::Gpt4Ocr);
        assert!((first.confidence - 90.0).abs() < 1e-9);
    }

    #[test]
    fn typed_arguments_go_through_converters() {
        let dict = FieldDictionary::spanish_real_estate();
        let results = map_arguments(
            &function("extract_listing_info"),
            &args(json!({
                "listing_type": "Sale",
                "price": 150000.5,
                "is_furnished": false,
                "ibi": null
            })),
            &dict,
            80.0,
            75.0,
        );
        assert_eq!(results.len(), 3);
        let price = results.iter().find(|r| r.db_column == "price").unwrap();
        assert_eq!(price.value, FieldValue::Decimal(Decimal::new(1_500_005, 1)));
        // default 75 damped by OCR 80
        assert!((price.confidence - 60.0).abs() < 1e-9);
        let furnished = results.iter().find(|r| r.db_column == "isFurnished").unwrap();
        assert_eq!(furnished.value, FieldValue::Boolean(false));
    }

    #[test]
    fn rejected_values_and_unknown_arguments_are_skipped() {
        let dict = FieldDictionary::spanish_real_estate();
        let results = map_arguments(
            &function("extract_basic_info"),
            &args(json!({ "bedrooms": 400, "postal_code": "99999", "helipad": true, "city": "Málaga" })),
            &dict,
            100.0,
            75.0,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].db_column, "city");
    }
}
