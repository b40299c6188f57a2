use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Translation failures, rendered into the tooltip's error line.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum TranslateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request timed out, please check the network connection")]
    Timeout,

    #[error("API request failed ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

pub type TranslateResult<T> = Result<T, TranslateError>;

/// Chat-completion request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// -- Response shapes: every field optional so a missing path is detected
// by `first_content` rather than by a decode failure --

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed `choices[0].message.content`, if present and non-empty.
    pub fn first_content(&self) -> TranslateResult<&str> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| TranslateError::MalformedResponse("missing choices".to_string()))?;
        let content = choice
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .ok_or_else(|| TranslateError::MalformedResponse("missing message content".to_string()))?
            .trim();
        if content.is_empty() {
            return Err(TranslateError::MalformedResponse("empty translation".to_string()));
        }
        Ok(content)
    }
}

/// Error envelope some endpoints return with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ChatResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_first_content_trims() {
        let response = parse(r#"{"choices":[{"message":{"role":"assistant","content":"  你好 \n"}}]}"#);
        assert_eq!(response.first_content().unwrap(), "你好");
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let response = parse(r#"{"choices":[]}"#);
        assert!(matches!(response.first_content(), Err(TranslateError::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        let response = parse(r#"{"id":"x"}"#);
        assert!(matches!(response.first_content(), Err(TranslateError::MalformedResponse(_))));
    }

    #[test]
    fn test_null_or_blank_content_is_malformed() {
        let null_content = parse(r#"{"choices":[{"message":{"content":null}}]}"#);
        assert!(null_content.first_content().is_err());

        let blank = parse(r#"{"choices":[{"message":{"content":"   "}}]}"#);
        assert!(blank.first_content().is_err());

        let no_message = parse(r#"{"choices":[{}]}"#);
        assert!(no_message.first_content().is_err());
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest {
            model: "deepseek-chat".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            stream: false,
            temperature: 0.3,
            max_tokens: 1000,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_error_serializes_tagged() {
        let json = serde_json::to_value(TranslateError::Timeout).unwrap();
        assert_eq!(json["type"], "Timeout");

        let json = serde_json::to_value(TranslateError::InvalidInput("empty".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "InvalidInput", "message": "empty" }));
    }
}
