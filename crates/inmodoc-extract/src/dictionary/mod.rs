//! The alias dictionary: every schema field the extractors can fill, with its
//! Spanish synonyms and the rules that turn raw OCR text into a value.
//!
//! The dictionary is an explicit value handed to every extractor, never a
//! process-wide global, so tests can run against trimmed or extended tables.

mod table;

use inmodoc_core::{
    AliasOverridesFile, ConfigError, DataType, DbTable, ExtractedFieldResult, ExtractionSource,
    FieldCategory, FieldValue,
};

use crate::error::FieldError;
use crate::normalize::normalize_label;
use crate::rules::{to_bool, to_decimal, to_number, to_text, Converter, Validator};

/// Static descriptor of one schema field.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    pub db_column: &'static str,
    pub db_table: DbTable,
    /// Spanish synonyms, in matching priority order.
    pub aliases: Vec<String>,
    pub data_type: DataType,
    pub category: FieldCategory,
    pub validation: Option<Validator>,
    pub converter: Option<Converter>,
    normalized_aliases: Vec<String>,
}

impl FieldMapping {
    #[must_use]
    pub fn new(
        db_table: DbTable,
        db_column: &'static str,
        data_type: DataType,
        category: FieldCategory,
        aliases: &[&str],
    ) -> Self {
        let mut mapping = Self {
            db_column,
            db_table,
            aliases: Vec::with_capacity(aliases.len()),
            data_type,
            category,
            validation: None,
            converter: None,
            normalized_aliases: Vec::with_capacity(aliases.len()),
        };
        for alias in aliases {
            mapping.push_alias(alias);
        }
        mapping
    }

    #[must_use]
    pub fn validated(mut self, validator: Validator) -> Self {
        self.validation = Some(validator);
        self
    }

    #[must_use]
    pub fn converted(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Aliases after [`normalize_label`], index-aligned with `aliases`.
    #[must_use]
    pub fn normalized_aliases(&self) -> &[String] {
        &self.normalized_aliases
    }

    /// Validates and converts a raw snippet for this field.
    ///
    /// Fields without an explicit converter fall back to the default
    /// conversion for their [`DataType`].
    ///
    /// # Errors
    ///
    /// - [`FieldError::Empty`] for blank input.
    /// - [`FieldError::Rejected`] when the validator refuses the snippet.
    /// - [`FieldError::Conversion`] when the converter fails.
    pub fn apply(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FieldError::Empty {
                column: self.db_column.to_string(),
            });
        }

        if let Some(validate) = self.validation {
            if !validate(raw) {
                return Err(FieldError::Rejected {
                    column: self.db_column.to_string(),
                    value: raw.to_string(),
                });
            }
        }

        let convert = self
            .converter
            .unwrap_or_else(|| default_converter(self.data_type));
        convert(raw).map_err(|reason| FieldError::Conversion {
            column: self.db_column.to_string(),
            value: raw.to_string(),
            reason,
        })
    }

    /// Runs [`FieldMapping::apply`] and wraps the value in a candidate result.
    ///
    /// # Errors
    ///
    /// Propagates the [`FieldError`] from [`FieldMapping::apply`].
    pub fn candidate(
        &self,
        raw: &str,
        confidence: f64,
        source: ExtractionSource,
        matched_alias: Option<&str>,
    ) -> Result<ExtractedFieldResult, FieldError> {
        let value = self.apply(raw)?;
        Ok(ExtractedFieldResult {
            db_column: self.db_column.to_string(),
            db_table: self.db_table,
            value,
            original_text: raw.trim().to_string(),
            confidence,
            extraction_source: source,
            field_type: self.data_type,
            matched_alias: matched_alias.map(str::to_string),
        })
    }

    /// Appends an alias unless an equivalent one is already present.
    /// Returns `true` when the alias was added.
    fn push_alias(&mut self, alias: &str) -> bool {
        let normalized = normalize_label(alias);
        if normalized.is_empty() || self.normalized_aliases.contains(&normalized) {
            return false;
        }
        self.aliases.push(alias.trim().to_string());
        self.normalized_aliases.push(normalized);
        true
    }
}

fn default_converter(data_type: DataType) -> Converter {
    match data_type {
        DataType::String => to_text,
        DataType::Number => to_number,
        DataType::Boolean => to_bool,
        DataType::Decimal => to_decimal,
    }
}

/// Ordered collection of [`FieldMapping`]s. Order matters: the matcher
/// breaks similarity ties in favour of the earlier mapping.
#[derive(Debug, Clone)]
pub struct FieldDictionary {
    mappings: Vec<FieldMapping>,
}

impl FieldDictionary {
    #[must_use]
    pub fn new(mappings: Vec<FieldMapping>) -> Self {
        Self { mappings }
    }

    /// The built-in Spanish real-estate schema.
    #[must_use]
    pub fn spanish_real_estate() -> Self {
        Self::new(table::builtin_mappings())
    }

    #[must_use]
    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    #[must_use]
    pub fn get(&self, table: DbTable, column: &str) -> Option<&FieldMapping> {
        self.mappings
            .iter()
            .find(|m| m.db_table == table && m.db_column == column)
    }

    pub fn in_category(&self, category: FieldCategory) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.iter().filter(move |m| m.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Appends site-specific aliases to existing mappings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when an override names a column
    /// the dictionary does not define.
    pub fn apply_overrides(&mut self, overrides: &AliasOverridesFile) -> Result<(), ConfigError> {
        for entry in &overrides.aliases {
            let mapping = self
                .mappings
                .iter_mut()
                .find(|m| m.db_table == entry.table && m.db_column == entry.column)
                .ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "alias override targets unknown field {}.{}",
                        entry.table, entry.column
                    ))
                })?;

            let added = entry
                .aliases
                .iter()
                .filter(|alias| mapping.push_alias(alias))
                .count();
            tracing::debug!(
                table = %entry.table,
                column = %entry.column,
                added,
                "applied alias override"
            );
        }
        Ok(())
    }
}

impl Default for FieldDictionary {
    fn default() -> Self {
        Self::spanish_real_estate()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use inmodoc_core::parse_alias_overrides;

    use super::*;

    #[test]
    fn builtin_dictionary_covers_all_tables_and_categories() {
        let dict = FieldDictionary::spanish_real_estate();
        for table in DbTable::ALL {
            assert!(
                dict.mappings().iter().any(|m| m.db_table == table),
                "no mapping for {table}"
            );
        }
        for category in FieldCategory::ALL {
            assert!(
                dict.in_category(category).next().is_some(),
                "no mapping for {category:?}"
            );
        }
    }

    #[test]
    fn columns_are_unique_per_table() {
        let dict = FieldDictionary::spanish_real_estate();
        let mut seen = HashMap::new();
        for m in dict.mappings() {
            assert!(
                seen.insert((m.db_table, m.db_column), ()).is_none(),
                "duplicate mapping {}.{}",
                m.db_table,
                m.db_column
            );
        }
    }

    #[test]
    fn normalized_aliases_do_not_collide_across_fields() {
        let dict = FieldDictionary::spanish_real_estate();
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for m in dict.mappings() {
            for alias in m.normalized_aliases() {
                if let Some(prev) = owner.insert(alias.as_str(), m.db_column) {
                    panic!("alias '{alias}' used by both {prev} and {}", m.db_column);
                }
            }
        }
    }

    #[test]
    fn every_mapping_has_aliases() {
        let dict = FieldDictionary::spanish_real_estate();
        for m in dict.mappings() {
            assert!(!m.aliases.is_empty(), "{} has no aliases", m.db_column);
            assert_eq!(m.aliases.len(), m.normalized_aliases().len());
        }
    }

    #[test]
    fn apply_validates_before_converting() {
        let dict = FieldDictionary::spanish_real_estate();
        let bedrooms = dict.get(DbTable::Properties, "bedrooms").unwrap();
        assert_eq!(bedrooms.apply(" 4 ").unwrap(), FieldValue::Integer(4));
        assert!(matches!(
            bedrooms.apply("120"),
            Err(FieldError::Rejected { .. })
        ));
        assert!(matches!(bedrooms.apply(""), Err(FieldError::Empty { .. })));
    }

    #[test]
    fn apply_uses_default_converter_for_data_type() {
        let dict = FieldDictionary::spanish_real_estate();
        let elevator = dict.get(DbTable::Properties, "hasElevator").unwrap();
        assert_eq!(elevator.apply("Sí").unwrap(), FieldValue::Boolean(true));
        let city = dict.get(DbTable::Properties, "city").unwrap();
        assert_eq!(
            city.apply("  Madrid   centro ").unwrap(),
            FieldValue::Text("Madrid centro".to_string())
        );
    }

    #[test]
    fn apply_reports_conversion_failures() {
        let dict = FieldDictionary::spanish_real_estate();
        let listing_type = dict.get(DbTable::Listings, "listingType").unwrap();
        assert!(matches!(
            listing_type.apply("permuta"),
            Err(FieldError::Conversion { .. })
        ));
    }

    #[test]
    fn overrides_append_new_aliases_once() {
        let mut dict = FieldDictionary::spanish_real_estate();
        let before = dict
            .get(DbTable::Properties, "bedrooms")
            .unwrap()
            .aliases
            .len();
        let overrides = parse_alias_overrides(
            "aliases:\n  - column: bedrooms\n    table: properties\n    aliases: [recámaras, Dormitorios]\n",
        )
        .unwrap();
        dict.apply_overrides(&overrides).unwrap();
        let bedrooms = dict.get(DbTable::Properties, "bedrooms").unwrap();
        assert_eq!(bedrooms.aliases.len(), before + 1);
        assert!(bedrooms.normalized_aliases().contains(&"recamaras".to_string()));
    }

    #[test]
    fn overrides_reject_unknown_column() {
        let mut dict = FieldDictionary::spanish_real_estate();
        let overrides = parse_alias_overrides(
            "aliases:\n  - column: helipad\n    table: properties\n    aliases: [helipuerto]\n",
        )
        .unwrap();
        assert!(matches!(
            dict.apply_overrides(&overrides),
            Err(ConfigError::Validation(_))
        ));
    }
}
