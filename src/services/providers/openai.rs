/// OpenAI-compatible chat-completions provider
///
/// Works against any endpoint that speaks the `/chat/completions` wire format.
/// The base URL is configurable so self-hosted gateways can be used.
use crate::{
    error::{AppError, AppResult},
    services::providers::{CompletionProvider, CompletionRequest},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);

        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Chat completion request failed");
            return Err(AppError::ExternalApi(format!(
                "Chat completion API returned status {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response.json().await?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::ExternalApi("Chat completion response has no content".to_string())
            })?;

        let answer = content.trim().to_string();
        tracing::debug!(model = %self.model, answer = %answer, "Chat completion received");

        Ok(answer)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "pick a venue".to_string(),
            prompt: "Option 1: A".to_string(),
            temperature: 0.4,
            top_p: 0.9,
            max_tokens: 200,
        }
    }

    #[tokio::test]
    async fn test_complete_sends_messages_and_parameters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body_partial(
                        r#"{
                            "model": "gpt-3.5-turbo",
                            "messages": [
                                {"role": "system", "content": "pick a venue"},
                                {"role": "user", "content": "Option 1: A"}
                            ],
                            "max_tokens": 200
                        }"#,
                    );
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "  2 \n"}}]
                }));
            })
            .await;

        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            server.url("/v1/"),
            "gpt-3.5-turbo".to_string(),
        );

        let answer = tokio_test::assert_ok!(provider.complete(&request()).await);
        assert_eq!(answer, "2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).body("rate limited");
            })
            .await;

        let provider = OpenAiProvider::new("k".to_string(), server.base_url(), "m".to_string());

        let err = tokio_test::assert_err!(provider.complete(&request()).await);
        assert!(matches!(err, AppError::ExternalApi(msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn test_complete_without_choices() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let provider = OpenAiProvider::new("k".to_string(), server.base_url(), "m".to_string());

        let err = tokio_test::assert_err!(provider.complete(&request()).await);
        assert!(matches!(err, AppError::ExternalApi(_)));
    }
}
