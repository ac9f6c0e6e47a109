//! Field validators and converters referenced by the alias dictionary.
//!
//! Validators answer "is this raw snippet plausible for the field?";
//! converters turn an accepted snippet into a typed [`FieldValue`]. Both take
//! the raw OCR text, so every extraction path (form, table, regex, LLM) shares
//! the same rules.

use std::sync::LazyLock;

use inmodoc_core::FieldValue;
use regex::Regex;

use crate::normalize::normalize_label;
use crate::parse::{parse_bool, parse_decimal, parse_integer, parse_number};

pub type Validator = fn(&str) -> bool;
pub type Converter = fn(&str) -> Result<FieldValue, &'static str>;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});
static CADASTRAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Z]{20}$").expect("valid regex"));
static DNI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([XYZ]?)(\d{7,8})([A-Z])$").expect("valid regex"));

const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

fn number_in(raw: &str, min: f64, max: f64) -> bool {
    parse_number(raw).is_some_and(|n| (min..=max).contains(&n))
}

pub fn valid_room_count(raw: &str) -> bool {
    parse_integer(raw).is_some_and(|n| (0..=50).contains(&n))
}

pub fn valid_bathroom_count(raw: &str) -> bool {
    parse_integer(raw).is_some_and(|n| (0..=20).contains(&n))
}

pub fn valid_small_count(raw: &str) -> bool {
    parse_integer(raw).is_some_and(|n| (0..=30).contains(&n))
}

pub fn valid_area(raw: &str) -> bool {
    number_in(raw, 1.0, 100_000.0)
}

pub fn valid_year(raw: &str) -> bool {
    parse_integer(raw).is_some_and(|n| (1700..=2100).contains(&n))
}

pub fn valid_price(raw: &str) -> bool {
    parse_decimal(raw).is_some_and(|d| d.is_sign_positive() && !d.is_zero())
}

pub fn valid_energy_value(raw: &str) -> bool {
    number_in(raw, 0.0, 10_000.0)
}

pub fn valid_energy_scale(raw: &str) -> bool {
    energy_letter(raw).is_some()
}

pub fn valid_cadastral_reference(raw: &str) -> bool {
    CADASTRAL_RE.is_match(&compact_upper(raw))
}

/// Spanish postal codes: five digits, province prefix 01–52.
pub fn valid_postal_code(raw: &str) -> bool {
    let code = raw.trim();
    code.len() == 5
        && code.bytes().all(|b| b.is_ascii_digit())
        && code[..2].parse::<u8>().is_ok_and(|p| (1..=52).contains(&p))
}

pub fn valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw.trim())
}

/// Nine to twelve digits once spaces, dots, dashes and a leading `+` are removed.
pub fn valid_phone(raw: &str) -> bool {
    let digits = phone_digits(raw);
    (9..=12).contains(&digits.len())
}

/// DNI (`12345678Z`) or NIE (`X1234567L`) with a correct control letter.
pub fn valid_nif(raw: &str) -> bool {
    let compact = compact_upper(raw);
    let Some(caps) = DNI_RE.captures(&compact) else {
        return false;
    };
    let prefix = match &caps[1] {
        "X" => "0",
        "Y" => "1",
        "Z" => "2",
        _ => "",
    };
    let number = format!("{prefix}{}", &caps[2]);
    let Ok(n) = number.parse::<usize>() else {
        return false;
    };
    if prefix.is_empty() && caps[2].len() != 8 {
        return false;
    }
    caps[3].as_bytes()[0] == DNI_LETTERS[n % 23]
}

pub fn non_empty(raw: &str) -> bool {
    !raw.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Converters
// ---------------------------------------------------------------------------

/// Trimmed text with internal whitespace collapsed.
pub fn to_text(raw: &str) -> Result<FieldValue, &'static str> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err("empty text");
    }
    Ok(FieldValue::Text(text))
}

pub fn to_number(raw: &str) -> Result<FieldValue, &'static str> {
    parse_number(raw)
        .map(FieldValue::number)
        .ok_or("not a number")
}

pub fn to_bool(raw: &str) -> Result<FieldValue, &'static str> {
    parse_bool(raw).map(FieldValue::Boolean).ok_or("not a yes/no answer")
}

pub fn to_decimal(raw: &str) -> Result<FieldValue, &'static str> {
    parse_decimal(raw)
        .map(FieldValue::Decimal)
        .ok_or("not a money amount")
}

pub fn to_integer(raw: &str) -> Result<FieldValue, &'static str> {
    parse_integer(raw)
        .map(FieldValue::Integer)
        .ok_or("not a whole number")
}

/// Canonical listing codes: `Sale`, `Rent`, `RentWithOption`, `RoomSharing`,
/// `Transfer`. Accepts Spanish phrasing and the canonical codes themselves.
pub fn to_listing_type(raw: &str) -> Result<FieldValue, &'static str> {
    let norm = normalize_label(raw);
    let code = if norm.contains("opcion a compra") || norm == "rentwithoption" {
        "RentWithOption"
    } else if norm.contains("traspaso") || norm == "transfer" {
        "Transfer"
    } else if (norm.contains("habitacion") && norm.contains("alquil")) || norm == "roomsharing" {
        "RoomSharing"
    } else if norm.contains("alquil") || norm.contains("arrend") || norm == "rent" {
        "Rent"
    } else if norm.contains("venta") || norm.contains("vende") || norm == "sale" {
        "Sale"
    } else {
        return Err("unknown listing type");
    };
    Ok(FieldValue::Text(code.to_string()))
}

pub fn to_property_type(raw: &str) -> Result<FieldValue, &'static str> {
    const TYPES: &[(&str, &[&str])] = &[
        (
            "piso",
            &["piso", "apartamento", "atico", "duplex", "estudio", "loft", "vivienda"],
        ),
        (
            "casa",
            &["casa", "chalet", "adosado", "pareado", "villa", "unifamiliar", "cortijo", "masia"],
        ),
        ("local", &["local", "oficina", "nave", "comercial"]),
        ("solar", &["solar", "terreno", "parcela", "finca rustica"]),
        ("garaje", &["garaje", "plaza de parking", "aparcamiento", "cochera"]),
    ];
    let norm = normalize_label(raw);
    TYPES
        .iter()
        .find(|(_, words)| words.iter().any(|w| norm.contains(w)))
        .map(|(code, _)| FieldValue::Text((*code).to_string()))
        .ok_or("unknown property type")
}

pub fn to_energy_scale(raw: &str) -> Result<FieldValue, &'static str> {
    energy_letter(raw)
        .map(|c| FieldValue::Text(c.to_ascii_uppercase().to_string()))
        .ok_or("not an energy scale letter")
}

pub fn to_cadastral_reference(raw: &str) -> Result<FieldValue, &'static str> {
    Ok(FieldValue::Text(compact_upper(raw)))
}

pub fn to_email(raw: &str) -> Result<FieldValue, &'static str> {
    Ok(FieldValue::Text(raw.trim().to_lowercase()))
}

/// Keeps a leading `+` and the digits.
pub fn to_phone(raw: &str) -> Result<FieldValue, &'static str> {
    let digits = phone_digits(raw);
    let plus = if raw.trim_start().starts_with('+') { "+" } else { "" };
    Ok(FieldValue::Text(format!("{plus}{digits}")))
}

pub fn to_nif(raw: &str) -> Result<FieldValue, &'static str> {
    Ok(FieldValue::Text(compact_upper(raw)))
}

/// Compass orientation, normalized to lowercase Spanish (`sur`, `noreste`, …).
pub fn to_orientation(raw: &str) -> Result<FieldValue, &'static str> {
    const ORIENTATIONS: &[&str] = &[
        "noreste", "noroeste", "sureste", "suroeste", "norte", "sur", "oeste", "este",
    ];
    let norm = normalize_label(raw).replace(' ', "");
    ORIENTATIONS
        .iter()
        .find(|o| norm.contains(*o))
        .map(|o| FieldValue::Text((*o).to_string()))
        .ok_or("unknown orientation")
}

/// Canonical condition codes: `NewBuild`, `VeryGood`, `Good`, `Renovated`,
/// `NeedsRenovation`.
pub fn to_conservation_status(raw: &str) -> Result<FieldValue, &'static str> {
    let norm = normalize_label(raw);
    let code = if norm.contains("estrenar") || norm.contains("obra nueva") || norm == "newbuild" {
        "NewBuild"
    } else if norm.contains("reformar") || norm.contains("rehabilitar") || norm == "needsrenovation"
    {
        "NeedsRenovation"
    } else if norm.contains("reformado") || norm == "renovated" {
        "Renovated"
    } else if norm.contains("muy buen") || norm.contains("excelente") || norm == "verygood" {
        "VeryGood"
    } else if norm.contains("bueno") || norm.contains("buen estado") || norm == "good" {
        "Good"
    } else {
        return Err("unknown conservation status");
    };
    Ok(FieldValue::Text(code.to_string()))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compact_upper(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .flat_map(char::to_uppercase)
        .collect()
}

fn phone_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// The single `a`–`g` token in the snippet, e.g. `"Clase: B"` → `b`.
fn energy_letter(raw: &str) -> Option<char> {
    let norm = normalize_label(raw);
    let mut letters = norm.split(' ').filter_map(|token| {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'a'..='g'), None) => Some(c),
            _ => None,
        }
    });
    let first = letters.next()?;
    letters.next().is_none().then_some(first)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn room_count_bounds() {
        assert!(valid_room_count("3"));
        assert!(valid_room_count("0"));
        assert!(!valid_room_count("51"));
        assert!(!valid_room_count("dos"));
    }

    #[test]
    fn year_bounds() {
        assert!(valid_year("1975"));
        assert!(!valid_year("975"));
        assert!(!valid_year("3020"));
    }

    #[test]
    fn price_must_be_positive() {
        assert!(valid_price("150.000 €"));
        assert!(!valid_price("0"));
        assert!(!valid_price("consultar"));
    }

    #[test]
    fn decimal_converter_normalizes_spanish_amounts() {
        assert_eq!(
            to_decimal("150.000,50€").unwrap(),
            FieldValue::Decimal(Decimal::new(15_000_050, 2))
        );
    }

    #[test]
    fn listing_type_maps_spanish_and_canonical() {
        let code = |raw| to_listing_type(raw).unwrap().as_str().map(str::to_string);
        assert_eq!(code("Venta").as_deref(), Some("Sale"));
        assert_eq!(code("se alquila").as_deref(), Some("Rent"));
        assert_eq!(code("Alquiler con opción a compra").as_deref(), Some("RentWithOption"));
        assert_eq!(code("alquiler de habitación").as_deref(), Some("RoomSharing"));
        assert_eq!(code("Traspaso").as_deref(), Some("Transfer"));
        assert_eq!(code("Sale").as_deref(), Some("Sale"));
        assert!(to_listing_type("permuta").is_err());
    }

    #[test]
    fn property_type_groups_synonyms() {
        assert_eq!(to_property_type("Ático dúplex").unwrap().as_str(), Some("piso"));
        assert_eq!(to_property_type("Chalet adosado").unwrap().as_str(), Some("casa"));
        assert_eq!(to_property_type("Nave industrial").unwrap().as_str(), Some("local"));
        assert!(to_property_type("barco").is_err());
    }

    #[test]
    fn energy_scale_letter() {
        assert!(valid_energy_scale("Clase: B"));
        assert_eq!(to_energy_scale("e").unwrap().as_str(), Some("E"));
        assert!(!valid_energy_scale("en trámite"));
        assert!(!valid_energy_scale("A o B"));
    }

    #[test]
    fn cadastral_reference_format() {
        assert!(valid_cadastral_reference("9872023 VH5797S 0001 WX"));
        assert_eq!(
            to_cadastral_reference("9872023vh5797s0001wx").unwrap().as_str(),
            Some("9872023VH5797S0001WX")
        );
        assert!(!valid_cadastral_reference("9872023VH5797S"));
    }

    #[test]
    fn postal_code_province_prefix() {
        assert!(valid_postal_code("28013"));
        assert!(!valid_postal_code("99013"));
        assert!(!valid_postal_code("2801"));
    }

    #[test]
    fn email_and_phone() {
        assert!(valid_email("Juan.Garcia@Example.es"));
        assert!(!valid_email("juan@"));
        assert_eq!(to_email(" Juan@Example.ES ").unwrap().as_str(), Some("juan@example.es"));
        assert!(valid_phone("+34 612 345 678"));
        assert!(!valid_phone("1234"));
        assert_eq!(to_phone("+34 612-345-678").unwrap().as_str(), Some("+34612345678"));
    }

    #[test]
    fn nif_control_letter() {
        assert!(valid_nif("12345678Z"));
        assert!(valid_nif("12345678-z"));
        assert!(!valid_nif("12345678A"));
        assert!(valid_nif("X1234567L"));
        assert!(!valid_nif("1234567Z"));
    }

    #[test]
    fn orientation_and_condition() {
        assert_eq!(to_orientation("Sur-Este").unwrap().as_str(), Some("sureste"));
        assert_eq!(to_orientation("Norte").unwrap().as_str(), Some("norte"));
        assert_eq!(to_orientation("oeste").unwrap().as_str(), Some("oeste"));
        assert_eq!(
            to_conservation_status("A reformar").unwrap().as_str(),
            Some("NeedsRenovation")
        );
        assert_eq!(
            to_conservation_status("Muy buen estado").unwrap().as_str(),
            Some("VeryGood")
        );
        assert_eq!(
            to_conservation_status("a estrenar").unwrap().as_str(),
            Some("NewBuild")
        );
    }
}
