//! HTTP client for an OpenAI-compatible chat-completions API.
//!
//! Wraps `reqwest` with bearer auth, a per-request timeout, retry on
//! transient failures and typed parsing of forced function calls. Use
//! [`LlmClient::new`] for production or [`LlmClient::with_base_url`] to point
//! at a mock server in tests.

use std::time::Duration;

use inmodoc_core::LlmSettings;
use reqwest::{Client, Url};

use crate::error::LlmError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope, FunctionDefinition, ToolChoice,
    ToolChoiceFunction, ToolDefinition,
};

/// Client for the chat-completions endpoint.
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl LlmClient {
    /// Creates a client from settings, using `settings.base_url`.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Config`] if no API key is configured.
    /// - [`LlmError::InvalidBaseUrl`] if the base URL does not parse.
    /// - [`LlmError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        Self::with_base_url(settings, &settings.base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`LlmClient::new`].
    pub fn with_base_url(settings: &LlmSettings, base_url: &str) -> Result<Self, LlmError> {
        let api_key = settings.require_api_key()?.to_owned();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("inmodoc/0.1 (ocr-field-extraction)")
            .build()?;

        // Normalise to exactly one trailing slash so `join` appends to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| LlmError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: settings.model.clone(),
            max_retries: settings.max_retries,
            retry_backoff_base_ms: settings.retry_backoff_base_ms,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one forced function call and returns the parsed arguments object.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] / [`LlmError::Status`] on network failure or a
    ///   non-2xx status once retries are exhausted.
    /// - [`LlmError::ApiError`] when a 2xx body carries an error envelope.
    /// - [`LlmError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`LlmError::MissingToolCall`] if the model did not call the function.
    /// - [`LlmError::InvalidArguments`] if the arguments are not a JSON object.
    pub async fn call_function(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        function: &FunctionDefinition,
    ) -> Result<serde_json::Map<String, serde_json::Value>, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            tools: vec![ToolDefinition {
                kind: "function",
                function,
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction {
                    name: &function.name,
                },
            },
        };

        let body = retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.post_json(&request)
        })
        .await?;
        Self::check_api_error(&body)?;

        let response: ChatResponse =
            serde_json::from_value(body).map_err(|e| LlmError::Deserialize {
                context: format!("chat completion for {}", function.name),
                source: e,
            })?;

        let call = response
            .choices
            .first()
            .and_then(|choice| choice.message.function_arguments())
            .ok_or_else(|| LlmError::MissingToolCall {
                function: function.name.clone(),
            })?;

        match serde_json::from_str::<serde_json::Value>(&call.arguments) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(LlmError::InvalidArguments {
                function: function.name.clone(),
                reason: format!("expected an object, got {other}"),
            }),
            Err(e) => Err(LlmError::InvalidArguments {
                function: function.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Sends a POST request and parses the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] on network failure, [`LlmError::Status`] on
    /// a non-2xx status and [`LlmError::Deserialize`] if the body is not
    /// valid JSON.
    async fn post_json(&self, request: &ChatRequest<'_>) -> Result<serde_json::Value, LlmError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
            context: self.endpoint.to_string(),
            source: e,
        })
    }

    /// Surfaces a `{"error": {"message"}}` envelope returned with a 2xx status.
    fn check_api_error(body: &serde_json::Value) -> Result<(), LlmError> {
        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let msg = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(LlmError::ApiError(msg));
        }
        Ok(())
    }
}
