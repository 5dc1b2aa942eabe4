//! Chat concierge route: a templated passthrough to an OpenAI-compatible
//! chat-completions API.
//!
//! The route holds no conversation state. Each `POST /api/chat` request
//! carries the client-side message history; the server prepends the fixed
//! concierge system prompt, forwards the call upstream, and returns the
//! assistant's reply as `{ "message": ... }`. Upstream failures never leak
//! detail to the caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use ballpark_core::config::ChatConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

const SYSTEM_PROMPT: &str = "You are Ballpark's lead concierge. Objective: qualify and convert.

Rules:
- Be concise. One or two short sentences per turn.
- Always end with a clear next step.
- If the answer impacts price/scope, ask 1 follow-up to clarify.
- Never expose internal tools or keys. No medical/legal/financial advice.
- If user intent is sales, move to quote or booking within 3 turns.
- If stuck or user gets vague, propose two concrete options.

Services offered:
- Mobile App Development ($50-$100/hr)
- Web Development ($40-$80/hr)
- UI/UX Design ($35-$70/hr)
- SEO & Social Media Marketing ($30-$60/hr)
- E-commerce Solutions ($40-$75/hr)
- IT & Cloud Solutions ($50-$90/hr)

For quotes, ask about service type and key features, then suggest they use the quote estimator.
For booking, direct them to schedule a call.
Keep responses helpful but brief.";

/// Reply used when the upstream answers without content.
const EMPTY_REPLY_FALLBACK: &str =
    "I apologize, but I'm having trouble right now. Please try the contact form.";

const FAILURE_MESSAGE: &str = "I apologize, but I'm having trouble right now. \
     Please try the contact form or call us directly.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat api key is not configured")]
    MissingApiKey,
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion over the caller's history. `Ok(None)` means the
    /// upstream answered without content.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ChatError>;
}

#[derive(Clone)]
pub struct ChatState {
    backend: Arc<dyn ChatBackend>,
}

pub fn router(backend: Arc<dyn ChatBackend>) -> Router {
    Router::new()
        .route("/api/chat", post(chat).options(preflight).fallback(method_not_allowed))
        .with_state(ChatState { backend })
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> (StatusCode, Json<ChatApiError>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ChatApiError { error: "Method not allowed".to_string(), message: None }),
    )
}

pub async fn chat(
    State(state): State<ChatState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ChatApiError>)> {
    let correlation_id = Uuid::new_v4().simple().to_string();

    let request: ChatRequest = if body.is_empty() {
        ChatRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|parse_error| {
            chat_failure(&correlation_id, &format!("request body parse failed: {parse_error}"))
        })?
    };

    match state.backend.complete(&request.messages).await {
        Ok(content) => {
            let message = content.unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string());
            info!(
                event_name = "chat.completion.returned",
                correlation_id = %correlation_id,
                turns = request.messages.len(),
                "chat completion returned"
            );
            Ok(Json(ChatResponse { message }))
        }
        Err(ChatError::MissingApiKey) => {
            error!(
                event_name = "chat.completion.unconfigured",
                correlation_id = %correlation_id,
                "chat request received but no api key is configured"
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatApiError {
                    error: "OpenAI API key not configured".to_string(),
                    message: None,
                }),
            ))
        }
        Err(upstream_error) => Err(chat_failure(&correlation_id, &upstream_error.to_string())),
    }
}

fn chat_failure(correlation_id: &str, detail: &str) -> (StatusCode, Json<ChatApiError>) {
    error!(
        event_name = "chat.completion.failed",
        correlation_id = %correlation_id,
        error = %detail,
        "chat completion failed"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatApiError {
            error: "Internal server error".to_string(),
            message: Some(FAILURE_MESSAGE.to_string()),
        }),
    )
}

/// Upstream client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChatClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatClient {
    pub fn from_config(config: &ChatConfig) -> Result<Self, reqwest::Error> {
        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_payload(&self, messages: &[ChatMessage]) -> serde_json::Value {
        let mut wire_messages =
            vec![serde_json::json!({ "role": "system", "content": SYSTEM_PROMPT })];
        wire_messages.extend(
            messages
                .iter()
                .map(|turn| serde_json::json!({ "role": turn.role, "content": turn.content })),
        );

        serde_json::json!({
            "model": self.model,
            "messages": wire_messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "tools": [{
                "type": "function",
                "function": {
                    "name": "getQuote",
                    "description": "Get a price quote for a service",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "service": {
                                "type": "string",
                                "enum": ["apps", "web", "uiux", "seo", "ecom", "cloud"]
                            },
                            "features": {
                                "type": "array",
                                "items": { "type": "string" }
                            }
                        },
                        "required": ["service"]
                    }
                }
            }]
        })
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatBackend for OpenAiChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ChatError> {
        let api_key = self.api_key.as_ref().ok_or(ChatError::MissingApiKey)?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&self.request_payload(messages))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::UpstreamStatus(response.status().as_u16()));
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion.choices.into_iter().next().and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::StatusCode;

    use super::{chat, ChatBackend, ChatError, ChatMessage, ChatState};

    enum Script {
        Reply(&'static str),
        Empty,
        Fail(ChatError),
    }

    struct ScriptedBackend(Script);

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<Option<String>, ChatError> {
            match &self.0 {
                Script::Reply(text) => Ok(Some(text.to_string())),
                Script::Empty => Ok(None),
                Script::Fail(ChatError::MissingApiKey) => Err(ChatError::MissingApiKey),
                Script::Fail(ChatError::UpstreamStatus(status)) => {
                    Err(ChatError::UpstreamStatus(*status))
                }
                Script::Fail(_) => Err(ChatError::UpstreamStatus(500)),
            }
        }
    }

    fn state(script: Script) -> State<ChatState> {
        State(ChatState { backend: Arc::new(ScriptedBackend(script)) })
    }

    #[tokio::test]
    async fn returns_the_upstream_reply() {
        let body = Bytes::from_static(
            br#"{"messages":[{"role":"user","content":"How much is a web shop?"}]}"#,
        );

        let result =
            chat(state(Script::Reply("Roughly $1,600-$3,200. Want a detailed quote?")), body)
                .await
                .expect("should succeed");

        assert_eq!(result.0.message, "Roughly $1,600-$3,200. Want a detailed quote?");
    }

    #[tokio::test]
    async fn empty_upstream_content_falls_back_to_the_apology_line() {
        let result = chat(state(Script::Empty), Bytes::from_static(b"{}"))
            .await
            .expect("should succeed");

        assert!(result.0.message.contains("having trouble right now"));
        assert!(result.0.message.contains("contact form"));
    }

    #[tokio::test]
    async fn missing_api_key_reports_the_configuration_error() {
        let (status, payload) = chat(state(Script::Fail(ChatError::MissingApiKey)), Bytes::new())
            .await
            .expect_err("should fail");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload.0.error, "OpenAI API key not configured");
    }

    #[tokio::test]
    async fn upstream_failure_is_translated_to_a_generic_error() {
        let (status, payload) =
            chat(state(Script::Fail(ChatError::UpstreamStatus(502))), Bytes::new())
                .await
                .expect_err("should fail");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload.0.error, "Internal server error");
        let message = payload.0.message.expect("generic message present");
        assert!(message.contains("call us directly"));
        assert!(!message.contains("502"), "upstream detail must not leak");
    }

    #[tokio::test]
    async fn missing_body_defaults_to_an_empty_history() {
        let result = chat(state(Script::Reply("Hi! What are you building?")), Bytes::new())
            .await
            .expect("should succeed");

        assert_eq!(result.0.message, "Hi! What are you building?");
    }
}
