//! Anthropic Messages API provider.
//!
//! Auth priority: config key → FISSION_API_KEY → ANTHROPIC_API_KEY
//! (resolved by [`Config::resolve_api_key`](crate::config::Config::resolve_api_key)).
//!
//! Only the text content blocks of a response are returned; other block
//! types (tool use, thinking) are skipped.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{FissionError, Result};

use super::{parse_provider_error, CompletionRequest, LLMProvider};

/// Public API base.
pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

/// Value of the required `anthropic-version` header.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model when none is configured.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Native Anthropic provider that speaks the Messages REST API directly.
pub struct AnthropicProvider {
    api_key: String,
    api_base: String,
    client: Client,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl AnthropicProvider {
    /// Build from the provider section of the config.
    pub fn from_config(api_key: &str, config: &ProviderConfig) -> Result<Self> {
        Self::new(
            api_key,
            &config.api_base,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn new(api_key: &str, api_base: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FissionError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build the `/v1/messages` request body for a single user turn.
    pub fn build_request_body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "system": request.system,
            "messages": [{
                "role": "user",
                "content": request.user
            }]
        })
    }

    /// Concatenate the `text` blocks of a Messages API response.
    pub fn extract_text(response: &Value) -> Option<String> {
        let blocks = response["content"].as_array()?;
        let texts: Vec<&str> = blocks
            .iter()
            .filter(|b| b["type"].as_str() == Some("text"))
            .filter_map(|b| b["text"].as_str())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join(""))
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = Self::build_request_body(&request);

        debug!("Anthropic request to model {}", request.model);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| FissionError::Provider(format!("Anthropic request failed: {}", e)))?;

        if response.status().is_success() {
            let json: Value = response.json().await.map_err(|e| {
                FissionError::Provider(format!("Failed to parse Anthropic response: {}", e))
            })?;
            return Self::extract_text(&json).ok_or_else(|| {
                FissionError::Provider("Anthropic response contained no text".to_string())
            });
        }

        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();

        // Anthropic errors look like {"type":"error","error":{"type":..,"message":..}}
        let body_msg = serde_json::from_str::<Value>(&error_text)
            .ok()
            .and_then(|v| {
                v["error"]["message"]
                    .as_str()
                    .map(|s| format!("Anthropic API error: {}", s))
            })
            .unwrap_or_else(|| format!("Anthropic API error: {}", error_text));

        Err(parse_provider_error(status, &body_msg))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn spawn_fake_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{}", addr)
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(DEFAULT_ANTHROPIC_MODEL, "be terse", 256, "name my startup")
    }

    #[test]
    fn test_build_request_body_shape() {
        let body = AnthropicProvider::build_request_body(&request());
        assert_eq!(body["model"], DEFAULT_ANTHROPIC_MODEL);
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["system"], "be terse");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "name my startup");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let response = json!({
            "content": [
                { "type": "thinking", "thinking": "hmm" },
                { "type": "text", "text": "{\"names\":" },
                { "type": "text", "text": "[]}" }
            ]
        });
        assert_eq!(
            AnthropicProvider::extract_text(&response).as_deref(),
            Some("{\"names\":[]}")
        );
    }

    #[test]
    fn test_extract_text_none_without_text_blocks() {
        let response = json!({ "content": [{ "type": "tool_use", "id": "x" }] });
        assert!(AnthropicProvider::extract_text(&response).is_none());
        assert!(AnthropicProvider::extract_text(&json!({})).is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider =
            AnthropicProvider::new("sk-secret", ANTHROPIC_API_BASE, Duration::from_secs(5)).unwrap();
        let rendered = format!("{:?}", provider);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_messages_url_trims_trailing_slash() {
        let provider =
            AnthropicProvider::new("k", "http://localhost:9999/", Duration::from_secs(5)).unwrap();
        assert_eq!(provider.messages_url(), "http://localhost:9999/v1/messages");
    }

    #[tokio::test]
    async fn test_complete_sends_headers_and_returns_text() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-api-key"], "sk-test");
                assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);
                assert_eq!(body["messages"][0]["content"], "name my startup");
                Json(json!({
                    "content": [{ "type": "text", "text": "{\"names\": []}" }]
                }))
            }),
        );
        let base = spawn_fake_api(router).await;
        let provider = AnthropicProvider::new("sk-test", &base, Duration::from_secs(5)).unwrap();

        let text = provider.complete(request()).await.unwrap();
        assert_eq!(text, "{\"names\": []}");
    }

    #[tokio::test]
    async fn test_complete_maps_rate_limit() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "type": "error",
                        "error": { "type": "rate_limit_error", "message": "slow down" }
                    })),
                )
            }),
        );
        let base = spawn_fake_api(router).await;
        let provider = AnthropicProvider::new("sk-test", &base, Duration::from_secs(5)).unwrap();

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, FissionError::RateLimited(m) if m.contains("slow down")));
    }

    #[tokio::test]
    async fn test_complete_maps_auth_failure_with_plain_body() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { (StatusCode::UNAUTHORIZED, "nope") }),
        );
        let base = spawn_fake_api(router).await;
        let provider = AnthropicProvider::new("bad", &base, Duration::from_secs(5)).unwrap();

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, FissionError::Auth(m) if m == "Anthropic API error: nope"));
    }

    #[tokio::test]
    async fn test_complete_network_failure_is_provider_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            AnthropicProvider::new("k", &format!("http://{}", addr), Duration::from_secs(2))
                .unwrap();
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, FissionError::Provider(_)));
    }
}
