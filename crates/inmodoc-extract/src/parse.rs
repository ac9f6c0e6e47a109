//! Spanish-format scalar parsing: numbers, money and yes/no answers.
//!
//! Spanish documents write `150.000,50 €` where English ones write
//! `150,000.50`. These helpers find the first numeric token in a snippet and
//! resolve which separator is the decimal point. See [`crate::rules`] for how
//! they compose into field converters.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::normalize::normalize_label;

/// Parses the first number in `raw`, honouring Spanish separators.
///
/// - `"150.000"` → `150000`, `"150.000,50"` → `150000.5`, `"85,5"` → `85.5`
/// - `"2.5"` → `2.5` (a single dot followed by other than three digits is a
///   decimal point)
///
/// Returns `None` when no digits are present.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    canonical_number(raw)?.parse().ok()
}

/// Like [`parse_number`] but exact, for money amounts.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&canonical_number(raw)?).ok()
}

/// Parses a whole number. Fractional values are rejected.
#[must_use]
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = parse_number(raw)?;
    if value.fract() != 0.0 || value.abs() > 1e15 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = value as i64;
    Some(whole)
}

/// Interprets a yes/no style answer.
///
/// Negative markers (`no`, `sin …`, `false`, `0`, `ninguno`) give `false`;
/// any other non-empty answer (`sí`, `x`, `con ascensor`, `incluido`) gives
/// `true`. Empty input is `None`.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    const NEGATIVE: &[&str] = &["no", "n", "false", "0", "ninguno", "ninguna", "nada", "sin"];
    const NEGATIVE_PREFIXES: &[&str] = &["no ", "sin ", "carece "];

    let norm = normalize_label(raw);
    if norm.is_empty() {
        return None;
    }
    if NEGATIVE.contains(&norm.as_str()) || NEGATIVE_PREFIXES.iter().any(|p| norm.starts_with(p)) {
        return Some(false);
    }
    Some(true)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Extracts the first numeric token and rewrites it with `.` as the only
/// decimal separator and no grouping separators.
fn canonical_number(raw: &str) -> Option<String> {
    let token = first_numeric_token(raw)?;
    let dots = token.matches('.').count();
    let commas = token.matches(',').count();

    let canonical = match (dots, commas) {
        (0, 0) => token.to_string(),
        (1, 0) if !is_thousands_group(token) => token.to_string(),
        (_, 0) => token.replace('.', ""),
        // A lone comma is the Spanish decimal separator, even in "1,500".
        (0, 1) => token.replace(',', "."),
        (0, _) => token.replace(',', ""),
        _ => {
            // Both present: the last one is the decimal separator.
            let last_dot = token.rfind('.').unwrap_or(0);
            let last_comma = token.rfind(',').unwrap_or(0);
            if last_comma > last_dot {
                token.replace('.', "").replace(',', ".")
            } else {
                token.replace(',', "")
            }
        }
    };

    Some(canonical)
}

/// `true` when exactly three digits follow the dot, which in Spanish
/// formatting marks a thousands group.
fn is_thousands_group(token: &str) -> bool {
    token
        .rfind('.')
        .map(|pos| &token[pos + 1..])
        .is_some_and(|tail| tail.len() == 3 && tail.bytes().all(|b| b.is_ascii_digit()))
}

/// Returns the first run of digits and `.`/`,` separators that starts with a
/// digit, e.g. `"Precio: 150.000,50 €"` → `"150.000,50"`.
fn first_numeric_token(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = start;
    while end < bytes.len() {
        let b = bytes[end];
        let is_sep = (b == b'.' || b == b',')
            && end + 1 < bytes.len()
            && bytes[end + 1].is_ascii_digit();
        if b.is_ascii_digit() || is_sep {
            end += 1;
        } else {
            break;
        }
    }
    Some(&raw[start..end])
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
