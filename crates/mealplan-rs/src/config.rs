//! Client and request configuration shared by the `mealplan` CLI and the
//! `mealplan-web` server.
//!
//! [`ClientArgs`] is a `clap` argument group; each binary flattens it into
//! its own parser so both accept the same flags and environment variables.
//! It converts into a [`ChatClient`] via [`build_client`](ClientArgs::build_client)
//! and into a [`RecommendConfig`] via [`recommend_config`](ClientArgs::recommend_config).

use std::time::Duration;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::{ChatClient, ChatRequest, CompletionError, DEFAULT_ENDPOINT, DEFAULT_MODEL, Message};

/// Log filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// The `EnvFilter` both binaries install: `RUST_LOG`, else [`DEFAULT_LOG_FILTER`].
pub fn env_filter() -> EnvFilter {
    env_filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

fn env_filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Per-request settings for the recommendation call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendConfig {
    /// Model identifier. Default: `"gpt-4o"`.
    pub model: String,
    /// Maximum completion tokens. Default: unset (service default).
    pub max_tokens: Option<u32>,
    /// Sampling temperature. Default: unset (service default).
    pub temperature: Option<f32>,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

impl RecommendConfig {
    /// Wrap `messages` in a request carrying this config's settings.
    pub fn build_request(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Completion-service flags.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint URL
    #[arg(long, env = "MEALPLAN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model to request recommendations from
    #[arg(long, env = "MEALPLAN_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Timeout for one completion call, in seconds
    #[arg(long, env = "MEALPLAN_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Maximum tokens in the completion
    #[arg(long, env = "MEALPLAN_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long, env = "MEALPLAN_TEMPERATURE")]
    pub temperature: Option<f32>,
}

impl ClientArgs {
    /// Build the HTTP client. Fails when no API key was supplied.
    pub fn build_client(&self) -> Result<ChatClient, String> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or("OPENAI_API_KEY is not set (pass --api-key or set it in the environment)")?;
        ChatClient::with_endpoint(
            api_key,
            self.endpoint.clone(),
            Duration::from_secs(self.timeout_secs),
        )
        .map_err(|e: CompletionError| e.to_string())
    }

    pub fn recommend_config(&self) -> RecommendConfig {
        RecommendConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        client: ClientArgs,
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(env_filter_from(None).to_string(), "info");
        assert_eq!(env_filter_from(Some("mealplan=loud")).to_string(), "info");
        assert_eq!(env_filter_from(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn default_config_uses_default_model() {
        let config = RecommendConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn build_request_carries_settings() {
        let config = RecommendConfig {
            model: "gpt-4o-mini".into(),
            max_tokens: Some(1500),
            temperature: Some(0.4),
        };
        let req = config.build_request(vec![Message::user("hi")]);
        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.max_tokens, Some(1500));
        assert_eq!(req.temperature, Some(0.4));
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "test",
            "--api-key",
            "sk-test",
            "--model",
            "gpt-4o-mini",
            "--endpoint",
            "http://127.0.0.1:9/v1/chat/completions",
            "--timeout-secs",
            "5",
            "--max-tokens",
            "800",
        ])
        .unwrap();
        let config = cli.client.recommend_config();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(800));

        let client = cli.client.build_client().unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let cli = TestCli::try_parse_from(["test", "--api-key", "  "]).unwrap();
        let err = cli.client.build_client().err().unwrap();
        assert!(err.contains("OPENAI_API_KEY"), "{err}");
    }
}
