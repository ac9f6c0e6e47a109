//! `fields` command and dictionary loading.

use inmodoc_core::{load_alias_overrides, AppConfig, DbTable};
use inmodoc_extract::FieldDictionary;

/// The built-in dictionary with the configured alias overrides applied.
///
/// # Errors
///
/// Returns an error if the overrides file cannot be read or names an unknown
/// column.
pub(crate) fn load_dictionary(config: &AppConfig) -> anyhow::Result<FieldDictionary> {
    let mut dictionary = FieldDictionary::spanish_real_estate();
    if let Some(path) = &config.aliases_path {
        let overrides = load_alias_overrides(path)?;
        dictionary.apply_overrides(&overrides)?;
        tracing::info!(path = %path.display(), entries = overrides.aliases.len(), "alias overrides applied");
    }
    Ok(dictionary)
}

/// Prints one line per mapping: table, column, type, category and aliases.
pub(crate) fn run_fields(dictionary: &FieldDictionary, table: Option<DbTable>) {
    let mut shown = 0usize;
    for mapping in dictionary
        .mappings()
        .iter()
        .filter(|m| table.map_or(true, |t| m.db_table == t))
    {
        let category = format!("{:?}", mapping.category).to_lowercase();
        println!(
            "{:<11} {:<24} {:<8} {:<11} {}",
            mapping.db_table.as_str(),
            mapping.db_column,
            mapping.data_type.to_string(),
            category,
            mapping.aliases.join(", ")
        );
        shown += 1;
    }
    println!("\n{shown} fields");
}
