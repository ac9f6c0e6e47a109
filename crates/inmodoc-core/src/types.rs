use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Target table for an extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbTable {
    Properties,
    Listings,
    Contacts,
}

impl DbTable {
    pub const ALL: [DbTable; 3] = [DbTable::Properties, DbTable::Listings, DbTable::Contacts];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DbTable::Properties => "properties",
            DbTable::Listings => "listings",
            DbTable::Contacts => "contacts",
        }
    }
}

impl std::fmt::Display for DbTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "properties" | "property" => Ok(DbTable::Properties),
            "listings" | "listing" => Ok(DbTable::Listings),
            "contacts" | "contact" => Ok(DbTable::Contacts),
            other => Err(format!(
                "unknown table '{other}'; expected properties, listings or contacts"
            )),
        }
    }
}

/// Declared storage type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Decimal,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "string"),
            DataType::Number => write!(f, "number"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Decimal => write!(f, "decimal"),
        }
    }
}

/// Which pass produced a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Form,
    Table,
    Regex,
    Text,
    #[serde(rename = "gpt4_ocr")]
    Gpt4Ocr,
}

/// Semantic grouping of schema fields. The LLM path issues one function
/// call per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Basic,
    Listing,
    Amenities,
    Energy,
    Condition,
    Kitchen,
    Spaces,
    Luxury,
    Appliances,
    Contact,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 10] = [
        FieldCategory::Basic,
        FieldCategory::Listing,
        FieldCategory::Amenities,
        FieldCategory::Energy,
        FieldCategory::Condition,
        FieldCategory::Kitchen,
        FieldCategory::Spaces,
        FieldCategory::Luxury,
        FieldCategory::Appliances,
        FieldCategory::Contact,
    ];
}

/// A converted field value.
///
/// Serializes untagged, so the JSON output carries plain scalars. Money
/// amounts are held as exact [`Decimal`]s and written as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Decimal(#[serde(serialize_with = "serialize_money")] Decimal),
    Boolean(bool),
}

/// Whole amounts as JSON integers, fractional ones as floats.
fn serialize_money<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract().is_zero() {
        if let Some(whole) = amount.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match amount.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(serde::ser::Error::custom(format!(
            "amount {amount} has no JSON number representation"
        ))),
    }
}

impl FieldValue {
    /// Builds a numeric value, collapsing whole numbers to [`FieldValue::Integer`].
    #[must_use]
    pub fn number(value: f64) -> Self {
        // 2^53: beyond this f64 no longer represents every integer exactly.
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
        if value.fract() == 0.0 && value.abs() < MAX_EXACT {
            #[allow(clippy::cast_possible_truncation)]
            let whole = value as i64;
            FieldValue::Integer(whole)
        } else {
            FieldValue::Number(value)
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Number(n) => Some(*n),
            FieldValue::Decimal(d) => d.to_string().parse().ok(),
            FieldValue::Text(_) | FieldValue::Boolean(_) => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Integer(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// One candidate value produced by a single extraction attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFieldResult {
    pub db_column: String,
    pub db_table: DbTable,
    pub value: FieldValue,
    /// Raw snippet the value was converted from.
    pub original_text: String,
    /// Heuristic score in `[0, 100]`.
    pub confidence: f64,
    pub extraction_source: ExtractionSource,
    pub field_type: DataType,
    #[serde(rename = "matched_alias")]
    pub matched_alias: Option<String>,
}

/// Final output of an extraction run: one column → value bag per table.
///
/// Bags are ordered maps so serialization is byte-stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompleteExtractedData {
    pub property: BTreeMap<String, FieldValue>,
    pub listing: BTreeMap<String, FieldValue>,
    pub contact: BTreeMap<String, FieldValue>,
}

impl CompleteExtractedData {
    /// Distributes results into their table bags. Later entries for the same
    /// column overwrite earlier ones, so callers pass consolidated results.
    #[must_use]
    pub fn from_results(results: &[ExtractedFieldResult]) -> Self {
        let mut data = Self::default();
        for result in results {
            data.bag_mut(result.db_table)
                .insert(result.db_column.clone(), result.value.clone());
        }
        data
    }

    #[must_use]
    pub fn bag(&self, table: DbTable) -> &BTreeMap<String, FieldValue> {
        match table {
            DbTable::Properties => &self.property,
            DbTable::Listings => &self.listing,
            DbTable::Contacts => &self.contact,
        }
    }

    fn bag_mut(&mut self, table: DbTable) -> &mut BTreeMap<String, FieldValue> {
        match table {
            DbTable::Properties => &mut self.property,
            DbTable::Listings => &mut self.listing,
            DbTable::Contacts => &mut self.contact,
        }
    }

    #[must_use]
    pub fn get(&self, table: DbTable, column: &str) -> Option<&FieldValue> {
        self.bag(table).get(column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.property.len() + self.listing.len() + self.contact.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
