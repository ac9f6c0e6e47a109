use inmodoc_core::ConfigError;
use thiserror::Error;

/// Errors returned by the chat-completions client.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` comes from the `{"error": {"message"}}`
    /// envelope when the body has one.
    #[error("LLM API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response carrying an error envelope.
    #[error("LLM API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The model answered without calling the requested function.
    #[error("no tool call in response for {function}")]
    MissingToolCall { function: String },

    /// The function arguments were not a JSON object.
    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
