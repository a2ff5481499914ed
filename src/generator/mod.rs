//! Generation orchestrator.
//!
//! [`NameGenerator`] sits between the HTTP/CLI surfaces and the upstream model.
//! Every request is normalized into a cache descriptor first; a hit is served
//! without touching the provider. On a miss the provider is called, its text
//! decoded with [`parse::parse_payload`], and the typed payload cached for
//! `cache_ttl_secs`. When there is no provider, the call fails, or the output
//! can't be decoded, canned [`fallback`] content is returned and nothing is
//! cached, so a later request retries upstream.
//!
//! Only invalid requests and key construction failures surface as errors.

pub mod fallback;
pub mod parse;
pub mod prompts;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{descriptor_of, CacheKey, ResponseCache};
use crate::config::{Config, DEFAULT_GENERATION_TTL_SECS};
use crate::error::Result;
use crate::providers::anthropic::DEFAULT_ANTHROPIC_MODEL;
use crate::providers::{CompletionRequest, LLMProvider};
use crate::types::{
    DeeperRequest, DeeperSuggestions, GenerateRequest, GenerationSource, NameSuggestions,
    SuggestionRequest, Suggestions,
};

/// Upstream call parameters and the TTL for parsed results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub model: String,
    pub max_tokens: u32,
    pub cache_ttl_secs: i64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: 4096,
            cache_ttl_secs: DEFAULT_GENERATION_TTL_SECS,
        }
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.provider.model.clone(),
            max_tokens: config.provider.max_tokens,
            cache_ttl_secs: config.cache.generation_ttl_secs,
        }
    }
}

/// A payload together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation<T> {
    pub payload: T,
    pub source: GenerationSource,
}

impl<T> Generation<T> {
    fn new(payload: T, source: GenerationSource) -> Self {
        Self { payload, source }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generation<U> {
        Generation {
            payload: f(self.payload),
            source: self.source,
        }
    }
}

/// Cache descriptor shapes, one per request kind.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RequestKey {
    Generate {
        prompt: String,
        num_results: u32,
        style: String,
        categories: Vec<String>,
    },
    Deeper {
        name: String,
        context: String,
        dimensions: Vec<String>,
    },
}

fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lowercase, trim, drop blanks, sort and de-duplicate.
fn normalize_list(items: Option<&[String]>) -> Vec<String> {
    let mut out: Vec<String> = items
        .unwrap_or_default()
        .iter()
        .map(|s| normalize_text(s))
        .filter(|s| !s.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Cache descriptor for a `generate` request.
pub fn generate_descriptor(request: &GenerateRequest) -> Result<Value> {
    descriptor_of(&RequestKey::Generate {
        prompt: normalize_text(&request.prompt),
        num_results: request.num_results,
        style: normalize_text(&request.style),
        categories: normalize_list(request.categories.as_deref()),
    })
}

/// Cache descriptor for a `deeper` request.
pub fn deeper_descriptor(request: &DeeperRequest) -> Result<Value> {
    descriptor_of(&RequestKey::Deeper {
        name: normalize_text(&request.name),
        context: normalize_text(&request.context),
        dimensions: normalize_list(request.dimensions.as_deref()),
    })
}

pub struct NameGenerator {
    cache: Arc<ResponseCache>,
    provider: Option<Arc<dyn LLMProvider>>,
    options: GeneratorOptions,
}

impl NameGenerator {
    pub fn new(
        cache: Arc<ResponseCache>,
        provider: Option<Arc<dyn LLMProvider>>,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            cache,
            provider,
            options,
        }
    }

    /// Whether an upstream provider is configured.
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Identifier of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Name suggestions for a free-text prompt.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Generation<NameSuggestions>> {
        request.validate()?;
        let descriptor = generate_descriptor(request)?;
        let categories = normalize_list(request.categories.as_deref());
        let user = prompts::render_generate_prompt(
            request.prompt.trim(),
            request.num_results,
            &request.style,
            &categories,
        );

        Ok(self
            .run(
                "generate",
                descriptor,
                user,
                NameSuggestions::normalize,
                || fallback::generate(request.num_results),
            )
            .await)
    }

    /// Related names for one source name, grouped by dimension.
    pub async fn go_deeper(&self, request: &DeeperRequest) -> Result<Generation<DeeperSuggestions>> {
        request.validate()?;
        let descriptor = deeper_descriptor(request)?;
        let name = request.name.trim();
        let dimensions = normalize_list(request.dimensions.as_deref());
        let user = prompts::render_deeper_prompt(name, &request.context, &dimensions);

        Ok(self
            .run(
                "deeper",
                descriptor,
                user,
                |payload: DeeperSuggestions| payload.normalize(name),
                || fallback::deeper(name),
            )
            .await)
    }

    /// Route a tagged request to the matching operation.
    pub async fn dispatch(&self, request: SuggestionRequest) -> Result<Generation<Suggestions>> {
        match request {
            SuggestionRequest::Generate(req) => {
                Ok(self.generate(&req).await?.map(Suggestions::Generate))
            }
            SuggestionRequest::Deeper(req) => {
                Ok(self.go_deeper(&req).await?.map(Suggestions::Deeper))
            }
        }
    }

    async fn run<T, P, F>(
        &self,
        kind: &'static str,
        descriptor: Value,
        user: String,
        post_process: P,
        fallback: F,
    ) -> Generation<T>
    where
        T: Serialize + DeserializeOwned,
        P: FnOnce(T) -> T,
        F: FnOnce() -> T,
    {
        let key = CacheKey::from_descriptor(&descriptor);

        if let Some(cached) = self.cache.lookup::<T>(&descriptor) {
            debug!(kind, key = %key.short(), "Serving cached suggestions");
            return Generation::new(cached, GenerationSource::Cache);
        }

        let Some(provider) = &self.provider else {
            info!(kind, "No generation service configured, using fallback suggestions");
            return Generation::new(fallback(), GenerationSource::Fallback);
        };

        let request = CompletionRequest::new(
            self.options.model.clone(),
            prompts::SYSTEM_PROMPT,
            self.options.max_tokens,
            user,
        );

        let text = match provider.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(kind, provider = provider.name(), error = %e, "Generation failed, using fallback");
                return Generation::new(fallback(), GenerationSource::Fallback);
            }
        };

        let Some(payload) = parse::parse_payload::<T>(&text) else {
            warn!(
                kind,
                response_len = text.len(),
                "Could not parse generation output, using fallback"
            );
            return Generation::new(fallback(), GenerationSource::Fallback);
        };

        let payload = post_process(payload);
        self.cache
            .store(&descriptor, &payload, Some(self.options.cache_ttl_secs));
        Generation::new(payload, GenerationSource::Upstream)
    }
}
