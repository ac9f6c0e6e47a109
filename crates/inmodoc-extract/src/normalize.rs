//! Label normalization shared by the matcher and the converters.
//!
//! OCR labels arrive with arbitrary casing, accents and punctuation
//! (`"Núm. Habitaciones:"`); aliases are written in plain Spanish. Both sides
//! go through [`normalize_label`] before comparison.

/// Lowercases, strips diacritics, replaces punctuation with spaces and
/// collapses whitespace.
///
/// `"Núm. Habitaciones:"` → `"num habitaciones"`; `"m²"` → `"m2"`.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        let folded = fold_char(c);
        if folded.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(folded);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Maps accented Latin letters to their base letter and superscript digits to
/// plain digits. Anything else passes through unchanged.
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        '²' => '2',
        '³' => '3',
        'º' | 'ª' => 'o',
        other => other,
    }
}

/// Returns `true` when `needle` appears in `haystack` as a whole run of words.
///
/// Both inputs must already be normalized.
#[must_use]
pub(crate) fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack
        .match_indices(needle)
        .any(|(start, _)| {
            let end = start + needle.len();
            let before_ok = start == 0 || haystack.as_bytes()[start - 1] == b' ';
            let after_ok = end == haystack.len() || haystack.as_bytes()[end] == b' ';
            before_ok && after_ok
        })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
