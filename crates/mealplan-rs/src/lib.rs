//! Goal-driven meal plan recommendations from a chat-completion model.
//!
//! `mealplan` turns a free-form dietary *goal* (e.g. `"다이어트"`) into three
//! candidate meal plans. The pipeline is linear and stateless:
//!
//! ```text
//! goal ──▶ guideline ──▶ prompt ──▶ Completion::complete ──▶ split_meal_plans ──▶ Recommendation
//! ```
//!
//! The completion service is reached through the [`Completion`] trait.
//! [`ChatClient`] is the production implementation, talking to any
//! OpenAI-compatible `/chat/completions` endpoint; tests and embedders can
//! supply their own.
//!
//! # Getting started
//!
//! ```ignore
//! use mealplan::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), CompletionError> {
//!     let api_key = std::env::var("OPENAI_API_KEY").unwrap();
//!     let client = ChatClient::new(api_key)?;
//!     let config = RecommendConfig::default();
//!
//!     let rec = recommend(&client, &config, "다이어트").await?;
//!     for (i, plan) in rec.meal_options.iter().enumerate() {
//!         println!("--- option {} ---\n{plan}", i + 1);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`guideline`] | Fixed goal → guideline table with a default fallback |
//! | [`prompt`] | System role, goal message and the fixed output template |
//! | [`segment`] | Splits one completion into exactly three [`MealOptions`](segment::MealOptions) |
//! | [`recommend`](mod@recommend) | Orchestrates one request end to end |
//! | [`config`] | Shared CLI/env configuration for the client and the request |
//! | [`error`] | [`CompletionError`] |

pub mod config;
pub mod error;
pub mod guideline;
pub mod prelude;
pub mod prompt;
pub mod recommend;
pub mod segment;

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use error::CompletionError;
pub use recommend::{Recommendation, recommend};
pub use segment::{MealOptions, split_meal_plans};

// ── Constants ──────────────────────────────────────────────────────

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for recommendation calls.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default request timeout for the completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A role-tagged message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body. Unset optional fields are omitted so the
/// service applies its own defaults.
#[derive(Serialize, Clone, Debug, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type of a completion call.
#[derive(Debug, Clone, Default)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    /// A completion carrying only text. Handy for [`Completion`] fakes.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Completion seam ────────────────────────────────────────────────

/// Boxed future returned by [`Completion::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ChatCompletion, CompletionError>> + Send + 'a>>;

/// A chat-completion service.
///
/// The recommendation pipeline only ever talks to this trait, so the HTTP
/// server and the tests can inject any implementation.
///
/// ```ignore
/// struct Canned(String);
///
/// impl Completion for Canned {
///     fn complete<'a>(&'a self, _request: &'a ChatRequest) -> CompletionFuture<'a> {
///         let text = self.0.clone();
///         Box::pin(async move { Ok(ChatCompletion::from_text(text)) })
///     }
/// }
/// ```
pub trait Completion: Send + Sync {
    /// Send one request and wait for its single completion.
    fn complete<'a>(&'a self, request: &'a ChatRequest) -> CompletionFuture<'a>;
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for an OpenAI-compatible chat completions API.
pub struct ChatClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ChatClient {
    /// Create a client for the default endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CompletionError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// Create a client for a custom endpoint URL and request timeout.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mealplan/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(CompletionError::ClientBuild)?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a chat completion request.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, CompletionError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={:?}, temp={:?}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(CompletionError::Request)?;

        let status = resp.status();
        let text = resp.text().await.map_err(CompletionError::Request)?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(CompletionError::Status { status, body: text });
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)?;

        if let Some(err) = parsed.error {
            return Err(CompletionError::Api(err.message));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());

        match choice {
            Some(c) => {
                debug!(
                    "LLM output: {} chars, finish_reason={:?}",
                    c.message.content.as_ref().map_or(0, |s| s.chars().count()),
                    c.finish_reason
                );
                Ok(ChatCompletion {
                    content: c.message.content,
                    usage: parsed.usage,
                    finish_reason: c.finish_reason,
                })
            }
            None => {
                debug!("LLM output: empty (no choices)");
                Ok(ChatCompletion {
                    content: None,
                    usage: parsed.usage,
                    finish_reason: None,
                })
            }
        }
    }
}

impl Completion for ChatClient {
    fn complete<'a>(&'a self, request: &'a ChatRequest) -> CompletionFuture<'a> {
        Box::pin(self.chat(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors() {
        let sys = Message::system("hello");
        assert_eq!(sys.role, MessageRole::System);
        assert_eq!(sys.content, "hello");

        let user = Message::user("world");
        assert_eq!(user.role, MessageRole::User);
    }

    #[test]
    fn chat_request_skips_unset_fields() {
        let req = ChatRequest {
            model: "test-model".into(),
            messages: vec![Message::user("hi")],
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn chat_request_keeps_set_fields() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![],
            max_tokens: Some(2048),
            temperature: Some(0.0),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["max_tokens"], 2048);
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn raw_response_parses_first_choice() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "hi"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
        }"#;
        let parsed: RawChatResponse = serde_json::from_str(body).unwrap();
        let choice = parsed.choices.unwrap().into_iter().next().unwrap();
        assert_eq!(choice.message.content.as_deref(), Some("hi"));
        assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
        assert_eq!(parsed.usage.unwrap().total_tokens, Some(4));
    }

    #[test]
    fn role_serializes_as_wire_name() {
        let json = serde_json::to_value(MessageRole::User).unwrap();
        assert_eq!(json, "user");
    }
}
