//! LLM function-calling extraction path for Spanish real-estate OCR payloads.

pub mod breaker;
pub mod client;
pub mod error;
pub mod functions;
pub mod mapping;
pub mod pipeline;
pub mod prompt;
pub(crate) mod retry;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use functions::{category_functions, CategoryFunction, ParamTarget};
pub use mapping::split_full_name;
pub use pipeline::{collect_llm_candidates, extract_fields_with_llm};
