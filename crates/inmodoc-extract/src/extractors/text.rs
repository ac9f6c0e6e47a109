use std::sync::LazyLock;

use inmodoc_core::{
    DbTable, ExtractedFieldResult, ExtractionConfig, ExtractionSource, OcrInput, RegexConfidence,
};
use regex::Regex;

use super::accept;
use crate::dictionary::FieldDictionary;

/// Characters inspected on each side of a match when checking vetoes.
const VETO_WINDOW_BEFORE: usize = 25;
const VETO_WINDOW_AFTER: usize = 20;

/// One entry of the free-text pattern bank. Capture group 1 is the raw value
/// for the target column.
#[derive(Debug)]
pub struct PatternRule {
    pub table: DbTable,
    pub column: &'static str,
    pub pattern: Regex,
    /// Words that disqualify a match when a word starting with them appears
    /// right around it, e.g. `terraza` next to a plain `m2` area.
    pub veto: &'static [&'static str],
    /// Same, but checked between the start of the match and the end of the
    /// capture, e.g. the `m2` of `precio por m2`.
    pub label_veto: &'static [&'static str],
}

fn rule(table: DbTable, column: &'static str, pattern: &str) -> PatternRule {
    PatternRule {
        table,
        column,
        pattern: Regex::new(pattern).expect("valid regex"),
        veto: &[],
        label_veto: &[],
    }
}

fn vetoed_rule(
    table: DbTable,
    column: &'static str,
    pattern: &str,
    veto: &'static [&'static str],
) -> PatternRule {
    PatternRule {
        veto,
        ..rule(table, column, pattern)
    }
}

fn labelled_rule(
    table: DbTable,
    column: &'static str,
    pattern: &str,
    label_veto: &'static [&'static str],
) -> PatternRule {
    PatternRule {
        label_veto,
        ..rule(table, column, pattern)
    }
}

/// `con ascensor` / `sin ascensor` / `no tiene ascensor` style phrases.
fn amenity(column: &'static str, words: &str) -> PatternRule {
    rule(
        DbTable::Properties,
        column,
        &format!(r"\b(con|sin|no tiene|tiene|dispone de|incluye)\s+(?:{words})\b"),
    )
}

const AREA: &str = r"(\d+(?:[.,]\d+)?)";

/// The built-in pattern bank, applied to the lowercased document text.
pub static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    let p = DbTable::Properties;
    let l = DbTable::Listings;
    let c = DbTable::Contacts;

    vec![
        // price
        labelled_rule(
            l,
            "price",
            r"\b(?:precio|pvp)\b[^\d\n]{0,25}(\d[\d.,]*)",
            &["m2", "m²", "metro"],
        ),
        vetoed_rule(
            l,
            "price",
            r"(\d[\d.,]*)\s*(?:€|euros?\b|eur\b)",
            &["comunidad", "ibi", "fianza", "gastos"],
        ),
        // areas
        rule(
            p,
            "builtSurfaceArea",
            &format!(r"{AREA}\s*(?:m2|m²|metros)\s*(?:cuadrados\s*)?construid"),
        ),
        rule(
            p,
            "builtSurfaceArea",
            &format!(r"superficie construida[:\s]*{AREA}"),
        ),
        rule(
            p,
            "terraceSize",
            &format!(r"terraza\s*(?:de\s*)?{AREA}\s*(?:m2|m²)"),
        ),
        vetoed_rule(
            p,
            "squareMeter",
            &format!(r"{AREA}\s*(?:m²|m2\b|metros cuadrados\b|metros\b)"),
            &["construid", "terraza", "parcela", "solar", "jardin", "jardín"],
        ),
        // room counts
        rule(
            p,
            "bedrooms",
            r"\b(\d{1,2})\s*(?:dormitorios?|habitaci(?:ó|o)n(?:es)?|hab\.)",
        ),
        rule(p, "bedrooms", r"(?:dormitorios|habitaciones)\s*:\s*(\d{1,2})\b"),
        rule(p, "bathrooms", r"\b(\d{1,2})\s*(?:baños?|banos?|aseos?)\b"),
        rule(p, "bathrooms", r"(?:baños|banos)\s*:\s*(\d{1,2})\b"),
        // building
        rule(
            p,
            "yearBuilt",
            r"(?:año de construcción|ano de construccion|construid[oa] en(?: el año)?|edificado en)[:\s]*(\d{4})\b",
        ),
        rule(
            p,
            "cadastralReference",
            r"(?:referencia catastral|ref\.? catastral)[:\s]*([0-9a-z]{7}\s?[0-9a-z]{7}\s?[0-9a-z]{4}\s?[0-9a-z]{2})\b",
        ),
        rule(
            p,
            "postalCode",
            r"(?:código postal|codigo postal|c\.\s?p\.|\bcp\b)[:\s]*(\d{5})\b",
        ),
        // energy
        rule(
            p,
            "energyCertification",
            r"(?:calificación energética|calificacion energetica|certificado energético|certificado energetico|clase energética|clase energetica)[:\s]*([a-g])\b",
        ),
        rule(
            p,
            "emissionsScale",
            r"(?:escala de emisiones|calificación de emisiones|calificacion de emisiones|emisiones)[:\s]*([a-g])\b",
        ),
        // listing
        rule(
            l,
            "listingType",
            r"\b(alquiler con opción a compra|alquiler con opcion a compra|se vende|en venta|venta|se alquila|en alquiler|alquiler|traspaso)\b",
        ),
        rule(
            l,
            "petsAllowed",
            r"\b(se admiten|no se admiten|admite|no admite)\s+mascotas\b",
        ),
        // contact
        rule(c, "email", r"([a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,})"),
        rule(
            c,
            "phone",
            r"(?:teléfono|telefono|tlf\.?|tel\.|móvil|movil)[:\s]*(\+?\d[\d\s.-]{7,14}\d)",
        ),
        rule(
            c,
            "nif",
            r"\b(?:dni|nie|nif)[:\s]*([xyz]?\d{7,8}[\s-]?[a-z])\b",
        ),
        // amenities
        amenity("hasElevator", "ascensor"),
        amenity("hasGarage", "garaje|plaza de garaje|parking"),
        amenity("hasStorageRoom", "trastero"),
        amenity("terrace", "terraza"),
        amenity("pool", "piscina"),
        amenity("garden", "jardín|jardin"),
        amenity("airConditioning", "aire acondicionado"),
        amenity("builtInWardrobes", "armarios empotrados"),
    ]
});

/// Runs the pattern bank over the full document text.
///
/// Each rule contributes at most one candidate: the first match whose
/// capture survives the veto words and the field's validation.
#[must_use]
pub fn extract_text_patterns(
    input: &OcrInput,
    dictionary: &FieldDictionary,
    config: &ExtractionConfig,
) -> Vec<ExtractedFieldResult> {
    let text = input.extracted_text.to_lowercase();
    if text.trim().is_empty() {
        return Vec::new();
    }

    PATTERN_RULES
        .iter()
        .filter_map(|rule| {
            let Some(mapping) = dictionary.get(rule.table, rule.column) else {
                tracing::debug!(column = rule.column, "pattern target not in dictionary");
                return None;
            };
            rule.pattern.captures_iter(&text).find_map(|caps| {
                let whole = caps.get(0)?;
                let value = caps.get(1)?;
                if is_vetoed(&text, whole.start(), whole.end(), rule.veto)
                    || has_word_starting_with(&text[whole.start()..value.end()], rule.label_veto)
                {
                    return None;
                }
                let confidence = regex_confidence(&config.regex, value.as_str(), whole.as_str());
                accept(mapping, value.as_str(), confidence, ExtractionSource::Regex, None)
            })
        })
        .collect()
}

/// Base score plus bonuses for a longer capture and a `label:` context.
fn regex_confidence(weights: &RegexConfidence, capture: &str, whole: &str) -> f64 {
    let mut score = weights.base;
    if capture.trim().chars().count() > 2 {
        score += weights.length_bonus;
    }
    if whole.contains(':') {
        score += weights.label_bonus;
    }
    score.min(weights.cap)
}

fn is_vetoed(text: &str, start: usize, end: usize, veto: &[&str]) -> bool {
    if veto.is_empty() {
        return false;
    }
    let before: String = {
        let mut chars: Vec<char> = text[..start].chars().rev().take(VETO_WINDOW_BEFORE).collect();
        chars.reverse();
        chars.into_iter().collect()
    };
    let after: String = text[end..].chars().take(VETO_WINDOW_AFTER).collect();
    has_word_starting_with(&before, veto) || has_word_starting_with(&after, veto)
}

/// `true` when one of `words` occurs in `text` at the start of a word, so
/// `mes` would not fire inside `semestre`.
fn has_word_starting_with(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| {
        text.match_indices(word).any(|(start, _)| {
            text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
    })
}
