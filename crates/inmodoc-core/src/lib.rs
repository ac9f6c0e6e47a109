//! Shared domain types and configuration for the inmodoc extraction crates.

pub mod aliases;
pub mod app_config;
pub mod config;
pub mod ocr;
pub mod types;

use thiserror::Error;

pub use aliases::{load_alias_overrides, parse_alias_overrides, AliasOverride, AliasOverridesFile};
pub use app_config::{
    AppConfig, ContainmentRule, Environment, ExtractionConfig, LlmSettings, RegexConfidence,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use ocr::{BlockRelationship, BlockType, DetectedField, OcrInput, TextractBlock};
pub use types::{
    CompleteExtractedData, DataType, DbTable, ExtractedFieldResult, ExtractionSource,
    FieldCategory, FieldValue,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read alias overrides file {path}: {source}")]
    AliasesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse alias overrides: {0}")]
    AliasesFileParse(#[source] serde_yaml::Error),

    #[error("alias overrides validation failed: {0}")]
    Validation(String),
}
