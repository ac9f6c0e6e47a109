//! Site-specific alias overrides loaded from YAML.
//!
//! The built-in dictionary covers common Spanish phrasing; agencies add their
//! own form labels here without touching code.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::types::DbTable;
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct AliasOverride {
    pub column: String,
    pub table: DbTable,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AliasOverridesFile {
    #[serde(default)]
    pub aliases: Vec<AliasOverride>,
}

/// Load and validate alias overrides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_alias_overrides(path: &Path) -> Result<AliasOverridesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AliasesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_alias_overrides(&content)
}

/// Parse and validate alias overrides from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_alias_overrides(content: &str) -> Result<AliasOverridesFile, ConfigError> {
    let file: AliasOverridesFile =
        serde_yaml::from_str(content).map_err(ConfigError::AliasesFileParse)?;
    validate_overrides(&file)?;
    Ok(file)
}

fn validate_overrides(file: &AliasOverridesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &file.aliases {
        if entry.column.trim().is_empty() {
            return Err(ConfigError::Validation(
                "alias override column must be non-empty".to_string(),
            ));
        }

        if entry.aliases.is_empty() || entry.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "alias override for {}.{} must list non-empty aliases",
                entry.table, entry.column
            )));
        }

        if !seen.insert((entry.table, entry.column.as_str())) {
            return Err(ConfigError::Validation(format!(
                "duplicate alias override for {}.{}",
                entry.table, entry.column
            )));
        }
    }

    Ok(())
}
