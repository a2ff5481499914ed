//! Generation service clients.
//!
//! The generator only needs one operation from an upstream model: send a
//! system instruction plus a single user message and get free-form text back.
//! [`LLMProvider`] is that seam; [`AnthropicProvider`] speaks the Anthropic
//! Messages API.

pub mod anthropic;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{FissionError, Result};

pub use anthropic::AnthropicProvider;

/// One-shot completion request: model, system instruction, output cap and a
/// single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub max_tokens: u32,
    pub user: String,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        max_tokens: u32,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            max_tokens,
            user: user.into(),
        }
    }
}

/// An upstream text generation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Run one completion and return the model's text output.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Short provider identifier for logs and health output.
    fn name(&self) -> &'static str;
}

/// Map an upstream HTTP failure status to an error variant.
pub fn parse_provider_error(status: u16, message: &str) -> FissionError {
    match status {
        401 | 403 => FissionError::Auth(message.to_string()),
        429 => FissionError::RateLimited(message.to_string()),
        500..=599 => FissionError::ServiceUnavailable(message.to_string()),
        _ => FissionError::Provider(format!("HTTP {}: {}", status, message)),
    }
}

/// Build the configured provider, or `None` when no credential is available.
///
/// A missing credential is not an error: the generator then serves fallback
/// content until the process is restarted with a key.
pub fn resolve_provider(config: &Config) -> Result<Option<Arc<dyn LLMProvider>>> {
    resolve_provider_with(config, |name| std::env::var(name).ok())
}

/// [`resolve_provider`] with an injectable environment lookup.
pub(crate) fn resolve_provider_with(
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<Arc<dyn LLMProvider>>> {
    let Some(api_key) = config.resolve_api_key_from(lookup) else {
        warn!("No API key found (FISSION_API_KEY / ANTHROPIC_API_KEY) - generation disabled");
        return Ok(None);
    };
    let provider = AnthropicProvider::from_config(&api_key, &config.provider)?;
    info!(model = %config.provider.model, "Anthropic client initialized");
    Ok(Some(Arc::new(provider)))
}
