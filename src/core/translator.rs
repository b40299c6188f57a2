//! Translator feature
//!
//! Sends the selection to an OpenAI-compatible chat-completion endpoint and
//! asks for a bare translation. One request per call, no retries.

pub mod types;
mod language;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::TranslatorConfig;
pub use language::{build_prompt, language_name, SYSTEM_PROMPT};
pub use types::{TranslateError, TranslateResult};
use types::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse};

/// Text used by [`DeepSeekTranslator::validate_api_key`].
const PROBE_TEXT: &str = "Hello";
const PROBE_LANG: &str = "zh";
const USER_AGENT: &str = "select-translate/translator";

fn build_client(user_agent: &str) -> TranslateResult<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| TranslateError::Network(format!("Failed to create HTTP client: {}", e)))
}

/// Anything that can turn a selection into its translation.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String>;
}

pub struct DeepSeekTranslator {
    api_key: String,
    config: TranslatorConfig,
    http: Client,
}

impl DeepSeekTranslator {
    pub fn new(api_key: &str) -> TranslateResult<Self> {
        Self::with_config(api_key, TranslatorConfig::default())
    }

    /// Create a translator against a custom endpoint (OpenAI-compatible APIs).
    pub fn with_config(api_key: &str, config: TranslatorConfig) -> TranslateResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(TranslateError::InvalidInput("API key is required".to_string()));
        }

        let http = build_client(USER_AGENT)?;

        Ok(Self {
            api_key: api_key.to_string(),
            config,
            http,
        })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Probe the endpoint with a trivial translation.
    pub async fn validate_api_key(&self) -> bool {
        self.translate(PROBE_TEXT, PROBE_LANG).await.is_ok()
    }

    fn validate_input(&self, text: &str, target_lang: &str) -> TranslateResult<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranslateError::InvalidInput("text must not be empty".to_string()));
        }
        if target_lang.is_empty() {
            return Err(TranslateError::InvalidInput("target language must not be empty".to_string()));
        }
        let length = trimmed.chars().count();
        if length > self.config.max_input_chars {
            return Err(TranslateError::InvalidInput(format!(
                "text must not exceed {} characters (got {})",
                self.config.max_input_chars, length
            )));
        }
        Ok(())
    }

    fn build_request(&self, text: &str, target_lang: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(text, target_lang)),
            ],
            stream: false,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    async fn send_request(&self, request: &ChatRequest) -> TranslateResult<ChatResponse> {
        let url = self.config.completions_url();

        let call = async {
            let response = self
                .http
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(request)
                .send()
                .await
                .map_err(|e| TranslateError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.error)
                    .and_then(|e| e.message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string());
                return Err(TranslateError::ApiError {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| TranslateError::Network(e.to_string()))?;
            serde_json::from_str::<ChatResponse>(&body)
                .map_err(|e| TranslateError::MalformedResponse(format!("invalid JSON: {}", e)))
        };

        // Dropping `call` on expiry cancels the in-flight request.
        match tokio::time::timeout(self.config.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TranslateError::Timeout),
        }
    }
}

#[async_trait]
impl Translator for DeepSeekTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String> {
        self.validate_input(text, target_lang)?;

        let request = self.build_request(text, target_lang);
        let response = self.send_request(&request).await.map_err(|e| {
            warn!(error = %e, "translation request failed");
            e
        })?;

        let translated = response.first_content()?;
        if translated == text {
            debug!("translation identical to input, likely already in target language");
            return Ok(text.to_string());
        }
        Ok(translated.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn translator() -> DeepSeekTranslator {
        DeepSeekTranslator::new("test-key").unwrap()
    }

    #[test]
    fn test_blank_api_key_rejected() {
        assert!(matches!(
            DeepSeekTranslator::new("   "),
            Err(TranslateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_client_build_failure_is_reported() {
        assert!(build_client(USER_AGENT).is_ok());
        assert!(matches!(
            build_client("bad\nagent"),
            Err(TranslateError::Network(_))
        ));
    }

    #[test]
    fn test_api_key_trimmed() {
        let translator = DeepSeekTranslator::new("  sk-abc \n").unwrap();
        assert_eq!(translator.api_key, "sk-abc");
    }

    #[tokio::test]
    async fn test_empty_text_is_invalid() {
        let result = translator().translate("", "zh").await;
        assert!(matches!(result, Err(TranslateError::InvalidInput(_))));

        let result = translator().translate("   \n", "zh").await;
        assert!(matches!(result, Err(TranslateError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_empty_language_is_invalid() {
        let result = translator().translate("hello", "").await;
        assert!(matches!(result, Err(TranslateError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_too_long_is_invalid() {
        let text = "a".repeat(151);
        let result = translator().translate(&text, "zh").await;
        assert!(matches!(result, Err(TranslateError::InvalidInput(_))));
    }

    #[test]
    fn test_length_counts_characters_after_trim() {
        let t = translator();
        let padded = format!("   {}   ", "文".repeat(150));
        assert!(t.validate_input(&padded, "en").is_ok());
        assert!(t.validate_input(&"文".repeat(151), "en").is_err());
    }

    #[test]
    fn test_build_request() {
        let request = translator().build_request("Bonjour", "en");
        assert_eq!(request.model, "deepseek-chat");
        assert!(!request.stream);
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1].content.contains("English"));
        assert!(request.messages[1].content.contains("Bonjour"));
    }

    // Wiremock-based tests for actual HTTP calls
    mod http_tests {
        use super::*;
        use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

        fn against(server: &MockServer) -> DeepSeekTranslator {
            let config = TranslatorConfig {
                base_url: server.uri(),
                ..TranslatorConfig::default()
            };
            DeepSeekTranslator::with_config("test-key", config).unwrap()
        }

        fn completion(content: &str) -> serde_json::Value {
            serde_json::json!({
                "id": "chatcmpl-1",
                "model": "deepseek-chat",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }]
            })
        }

        #[tokio::test]
        async fn test_translate_success() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .and(matchers::path("/chat/completions"))
                .and(matchers::header("Authorization", "Bearer test-key"))
                .and(matchers::header("Content-Type", "application/json"))
                .and(matchers::body_partial_json(serde_json::json!({
                    "model": "deepseek-chat",
                    "stream": false,
                    "temperature": 0.3,
                    "max_tokens": 1000
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(completion(" 早上好 ")))
                .expect(1)
                .mount(&server)
                .await;

            let result = against(&server).translate("Good morning", "zh").await.unwrap();
            assert_eq!(result, "早上好");
        }

        #[tokio::test]
        async fn test_boundary_length_is_sent() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
                .expect(1)
                .mount(&server)
                .await;

            let text = "a".repeat(150);
            assert_eq!(against(&server).translate(&text, "zh").await.unwrap(), "ok");
        }

        #[tokio::test]
        async fn test_invalid_input_never_hits_network() {
            let server = MockServer::start().await;
            Mock::given(matchers::any())
                .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
                .expect(0)
                .mount(&server)
                .await;

            let text = "a".repeat(151);
            let result = against(&server).translate(&text, "zh").await;
            assert!(matches!(result, Err(TranslateError::InvalidInput(_))));
        }

        #[tokio::test]
        async fn test_same_text_returned_unchanged() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(completion("你好")))
                .mount(&server)
                .await;

            let result = against(&server).translate("你好", "zh").await.unwrap();
            assert_eq!(result, "你好");
        }

        #[tokio::test]
        async fn test_api_error_with_message() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                    "error": { "message": "Authentication Fails", "type": "authentication_error" }
                })))
                .mount(&server)
                .await;

            let result = against(&server).translate("hello", "zh").await;
            assert_eq!(
                result,
                Err(TranslateError::ApiError {
                    status: 401,
                    message: "Authentication Fails".to_string()
                })
            );
        }

        #[tokio::test]
        async fn test_api_error_without_body_uses_reason() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let result = against(&server).translate("hello", "zh").await;
            assert_eq!(
                result,
                Err(TranslateError::ApiError {
                    status: 500,
                    message: "Internal Server Error".to_string()
                })
            );
        }

        #[tokio::test]
        async fn test_empty_choices_is_malformed() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
                )
                .mount(&server)
                .await;

            let result = against(&server).translate("hello", "zh").await;
            assert!(matches!(result, Err(TranslateError::MalformedResponse(_))));
        }

        #[tokio::test]
        async fn test_non_json_body_is_malformed() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
                .mount(&server)
                .await;

            let result = against(&server).translate("hello", "zh").await;
            assert!(matches!(result, Err(TranslateError::MalformedResponse(_))));
        }

        #[tokio::test]
        async fn test_slow_response_times_out() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(completion("late"))
                        .set_delay(Duration::from_millis(500)),
                )
                .mount(&server)
                .await;

            let config = TranslatorConfig {
                base_url: server.uri(),
                timeout: Duration::from_millis(50),
                ..TranslatorConfig::default()
            };
            let translator = DeepSeekTranslator::with_config("test-key", config).unwrap();

            let result = translator.translate("hello", "zh").await;
            assert_eq!(result, Err(TranslateError::Timeout));
        }

        #[tokio::test]
        async fn test_connection_refused_is_network_error() {
            let config = TranslatorConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                ..TranslatorConfig::default()
            };
            let translator = DeepSeekTranslator::with_config("test-key", config).unwrap();

            let result = translator.translate("hello", "zh").await;
            assert!(matches!(result, Err(TranslateError::Network(_))));
        }

        #[tokio::test]
        async fn test_validate_api_key() {
            let server = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .and(matchers::header("Authorization", "Bearer test-key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(completion("你好")))
                .mount(&server)
                .await;
            assert!(against(&server).validate_api_key().await);

            let rejecting = MockServer::start().await;
            Mock::given(matchers::method("POST"))
                .respond_with(ResponseTemplate::new(401))
                .mount(&rejecting)
                .await;
            assert!(!against(&rejecting).validate_api_key().await);
        }
    }
}
