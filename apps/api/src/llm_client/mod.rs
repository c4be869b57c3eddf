/// LLM Client: the single point of entry for OpenRouter chat completion calls.
///
/// No other module may call the completions endpoint directly.
/// The model is chosen per call from the catalog; the endpoint is fixed.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("OPENROUTER_API_KEY is not configured")]
    MissingApiKey,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

impl<'a> ChatRequest<'a> {
    /// System + user messages, with output constrained to a JSON object.
    fn json_object(model: &'a str, system: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenRouterError {
    error: OpenRouterErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenRouterErrorBody {
    message: String,
}

/// Thin wrapper over the OpenRouter chat completions API.
/// One request per call: no retries and no client-side timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, OPENROUTER_API_URL)
    }

    /// Same client pointed at another completions URL.
    pub fn with_endpoint(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    /// Makes a single call to the completions endpoint, returning the full response.
    /// Without a configured key the call fails before anything is sent.
    pub async fn call(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<ChatResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let request_body = ChatRequest::json_object(model, system, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenRouterError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    /// Calls the endpoint and deserializes the first choice's content as JSON.
    /// The system prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(model, system, prompt).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // Some models still wrap JSON in markdown fences
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_completions_stub;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn completion(content: &str) -> Value {
        json!({
            "id": "gen-1",
            "choices": [{ "message": { "role": "assistant", "content": content } }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160 }
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ChatRequest::json_object(
            "openai/gpt-3.5-turbo",
            "schema",
            "resume + jd",
        ))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "model": "openai/gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "schema" },
                    { "role": "user", "content": "resume + jd" }
                ],
                "response_format": { "type": "json_object" }
            })
        );
    }

    #[test]
    fn test_response_text_is_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                { "message": { "content": "first" } },
                { "message": { "content": "second" } }
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_value(json!({ "id": "x" })).unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_call_sends_bearer_and_body() {
        let stub = spawn_completions_stub(StatusCode::OK, completion("{\"ok\": true}")).await;
        let client = LlmClient::with_endpoint(Some("sk-or-test".to_string()), stub.url.clone());

        let value: Value = client
            .call_json("google/palm-2", "system text", "user text")
            .await
            .unwrap();
        assert_eq!(value, json!({ "ok": true }));

        let captured = stub.captured().await;
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].authorization.as_deref(), Some("Bearer sk-or-test"));
        assert_eq!(captured[0].body["model"], "google/palm-2");
        assert_eq!(captured[0].body["messages"][1]["content"], "user text");
        assert_eq!(captured[0].body["response_format"]["type"], "json_object");
    }

    #[tokio::test]
    async fn test_call_json_accepts_fenced_content() {
        let stub =
            spawn_completions_stub(StatusCode::OK, completion("```json\n{\"n\": 1}\n```")).await;
        let client = LlmClient::with_endpoint(Some("k".to_string()), stub.url.clone());

        let value: Value = client.call_json("m", "s", "p").await.unwrap();
        assert_eq!(value["n"], 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error_with_message() {
        let stub = spawn_completions_stub(
            StatusCode::UNAUTHORIZED,
            json!({ "error": { "message": "No auth credentials found", "code": 401 } }),
        )
        .await;
        let client = LlmClient::with_endpoint(Some("bad".to_string()), stub.url.clone());

        let err = client.call("m", "s", "p").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "No auth credentials found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_content_is_parse_error() {
        let stub = spawn_completions_stub(StatusCode::OK, completion("I cannot help")).await;
        let client = LlmClient::with_endpoint(Some("k".to_string()), stub.url.clone());

        let err = client.call_json::<Value>("m", "s", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_content() {
        let stub = spawn_completions_stub(StatusCode::OK, json!({ "choices": [] })).await;
        let client = LlmClient::with_endpoint(Some("k".to_string()), stub.url.clone());

        let err = client.call_json::<Value>("m", "s", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let stub = spawn_completions_stub(StatusCode::OK, completion("{}")).await;
        let client = LlmClient::with_endpoint(None, stub.url.clone());

        let err = client.call("m", "s", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
        assert!(stub.captured().await.is_empty());
    }
}
