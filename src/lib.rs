//! Fission: business name ideation backed by an LLM, with a file-based TTL
//! response cache in front of the upstream calls.
//!
//! - [`cache`]: descriptor keys and the on-disk record store
//! - [`generator`]: the orchestrator, prompts, output parsing and fallback content
//! - [`providers`]: the upstream generation service client
//! - [`api`]: the axum HTTP layer

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod providers;
pub mod types;

pub use cache::{CacheKey, CacheStats, ResponseCache};
pub use config::Config;
pub use error::{FissionError, Result};
pub use generator::{Generation, GeneratorOptions, NameGenerator};
pub use providers::{AnthropicProvider, CompletionRequest, LLMProvider};
pub use types::{
    DeeperRequest, DeeperSuggestions, GenerateRequest, GenerationSource, NameSuggestions,
    SuggestionRequest, Suggestions,
};
