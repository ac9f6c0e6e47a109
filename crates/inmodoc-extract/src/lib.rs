//! Rule-based field extraction from Spanish real-estate OCR payloads.

pub mod consolidate;
pub mod dictionary;
pub mod error;
pub mod extractors;
pub mod matcher;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod rules;

pub use consolidate::consolidate;
pub use dictionary::{FieldDictionary, FieldMapping};
pub use error::FieldError;
pub use matcher::{find_best_match, find_best_match_with, similarity, similarity_with, FieldMatch};
pub use normalize::normalize_label;
pub use pipeline::{collect_candidates, extract_fields, ExtractionOutput};
