//! Wire types for the OpenAI-compatible chat-completions endpoint.
//!
//! Only the fields the extraction path reads or writes are modelled.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub temperature: f64,
    pub messages: Vec<ChatMessage<'a>>,
    pub tools: Vec<ToolDefinition<'a>>,
    pub tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// `{"type": "function", "function": {...}}`
#[derive(Debug, Serialize)]
pub struct ToolDefinition<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: &'a FunctionDefinition,
}

/// A callable function: name, description and JSON-schema parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Forces the model to call one named function.
#[derive(Debug, Serialize)]
pub struct ToolChoice<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: ToolChoiceFunction<'a>,
}

#[derive(Debug, Serialize)]
pub struct ToolChoiceFunction<'a> {
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// Absent or `null` when the model answered in prose.
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Legacy single-function shape.
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments object.
    pub arguments: String,
}

impl ResponseMessage {
    /// Arguments of the first tool call, falling back to the legacy
    /// `function_call` field.
    #[must_use]
    pub fn function_arguments(&self) -> Option<&FunctionCall> {
        self.tool_calls
            .as_deref()
            .and_then(<[ToolCall]>::first)
            .map(|call| &call.function)
            .or(self.function_call.as_ref())
    }
}

/// `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tool_calls_is_a_prose_answer() {
        let body = r#"{"choices":[{"message":{"content":"No sé","tool_calls":null}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices[0].message.function_arguments().is_none());
    }

    #[test]
    fn reads_tool_call_arguments() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null,
            "tool_calls":[{"id":"call_1","type":"function",
            "function":{"name":"extract_basic_info","arguments":"{\"bedrooms\":3}"}}]}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        let call = resp.choices[0].message.function_arguments().unwrap();
        assert_eq!(call.name, "extract_basic_info");
        assert_eq!(call.arguments, r#"{"bedrooms":3}"#);
    }

    #[test]
    fn falls_back_to_legacy_function_call() {
        let body = r#"{"choices":[{"message":{"function_call":
            {"name":"extract_energy_info","arguments":"{}"}}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        let call = resp.choices[0].message.function_arguments().unwrap();
        assert_eq!(call.name, "extract_energy_info");
    }

    #[test]
    fn plain_text_answer_has_no_call() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"No sé"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices[0].message.function_arguments().is_none());
    }

    #[test]
    fn request_serializes_tool_choice() {
        let function = FunctionDefinition {
            name: "extract_kitchen_info".to_string(),
            description: "kitchen".to_string(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        };
        let req = ChatRequest {
            model: "gpt-4o",
            temperature: 0.0,
            messages: vec![ChatMessage {
                role: "user",
                content: "hola",
            }],
            tools: vec![ToolDefinition {
                kind: "function",
                function: &function,
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction {
                    name: &function.name,
                },
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "extract_kitchen_info");
        assert_eq!(value["tool_choice"]["function"]["name"], "extract_kitchen_info");
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
