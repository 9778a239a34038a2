use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;

const SYSTEM_PROMPT: &str = "You are a versatile, creative storyteller who can write engaging stories in multiple languages and prose styles.";
const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 2000;
const TOP_P: f32 = 1.0;

#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    #[error("GROQ_API_KEY is not configured. Set it in the environment before starting the server.")]
    Configuration,

    #[error("Completion API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed completion API response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No story content received from API")]
    NoContent,

    #[error("Completion API did not respond within {0} seconds")]
    Timeout(u64),

    #[error("Error calling completion API: {0}")]
    Transport(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client used to write stories.
pub struct StoryClient {
    client: Client,
    api_key: Option<SecretString>,
    api_url: String,
    model: String,
    timeout_secs: u64,
}

impl StoryClient {
    pub fn new(config: CompletionConfig) -> Result<Self, StoryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StoryError::Transport)?;

        Ok(Self {
            client,
            api_key: config.api_key,
            api_url: config.api_url,
            model: config.model,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send `prompt` and return the first choice's text, trimmed.
    pub async fn generate(&self, prompt: &str) -> Result<String, StoryError> {
        let api_key = self.api_key.as_ref().ok_or(StoryError::Configuration)?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        };

        tracing::debug!(
            "Completion request: model={}, prompt_len={}",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if status != StatusCode::OK {
            tracing::error!("Completion API error ({status}): {text}");
            return Err(StoryError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(StoryError::NoContent)?;

        let story = content.trim().to_string();
        tracing::info!("Received story: {} chars", story.chars().count());

        Ok(story)
    }

    fn transport_error(&self, e: reqwest::Error) -> StoryError {
        if e.is_timeout() {
            StoryError::Timeout(self.timeout_secs)
        } else {
            StoryError::Transport(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer, api_key: Option<&str>) -> StoryClient {
        StoryClient::new(CompletionConfig {
            api_key: api_key.map(|key| SecretString::from(key.to_string())),
            api_url: format!("{}/openai/v1/chat/completions", server.uri()),
            ..CompletionConfig::default()
        })
        .unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        })
    }

    #[tokio::test]
    async fn returns_trimmed_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .and(body_partial_json(json!({
                "model": "llama3-8b-8192",
                "max_tokens": 2000,
                "stream": false,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "Tell me a story"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "\n  Once upon a time, a robot learned to love.  \n",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let story = test_client(&server, Some("gsk_test"))
            .generate("Tell me a story")
            .await
            .unwrap();

        assert_eq!(story, "Once upon a time, a robot learned to love.");
    }

    #[tokio::test]
    async fn unauthorized_is_upstream_error_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid api key"}"#),
            )
            .mount(&server)
            .await;

        let err = test_client(&server, Some("bad"))
            .generate("Tell me a story")
            .await
            .unwrap_err();

        assert!(matches!(err, StoryError::Upstream { status: 401, .. }));
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn empty_choices_is_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = test_client(&server, Some("gsk_test"))
            .generate("Tell me a story")
            .await
            .unwrap_err();

        assert!(matches!(err, StoryError::NoContent));
    }

    #[tokio::test]
    async fn missing_choices_is_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .mount(&server)
            .await;

        let err = test_client(&server, Some("gsk_test"))
            .generate("Tell me a story")
            .await
            .unwrap_err();

        assert!(matches!(err, StoryError::NoContent));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server, Some("gsk_test"))
            .generate("Tell me a story")
            .await
            .unwrap_err();

        assert!(matches!(err, StoryError::Malformed(_)));
    }

    #[tokio::test]
    async fn missing_key_fails_before_network_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server, None);
        assert!(!client.is_configured());

        let err = client.generate("Tell me a story").await.unwrap_err();
        assert!(matches!(err, StoryError::Configuration));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("too late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = StoryClient::new(CompletionConfig {
            api_key: Some(SecretString::from("gsk_test".to_string())),
            api_url: format!("{}/v1/chat/completions", server.uri()),
            timeout: Duration::from_millis(200),
            ..CompletionConfig::default()
        })
        .unwrap();

        let err = client.generate("Tell me a story").await.unwrap_err();
        assert!(matches!(err, StoryError::Timeout(_)));
    }
}
