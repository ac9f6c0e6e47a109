use thiserror::Error;

/// Why a raw snippet could not become a field value. Extractors log these at
/// debug level and drop the candidate; they never abort a run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("empty value for {column}")]
    Empty { column: String },

    #[error("value \"{value}\" rejected by validation for {column}")]
    Rejected { column: String, value: String },

    #[error("cannot convert \"{value}\" for {column}: {reason}")]
    Conversion {
        column: String,
        value: String,
        reason: &'static str,
    },
}
