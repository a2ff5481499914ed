//! Request and response records for the two request kinds.
//!
//! `generate` turns a free-text prompt into a list of name suggestions
//! grouped into threads. `deeper` explores one name along several
//! dimensions. Upstream output is decoded straight into these types, so a
//! malformed model response fails at the parse boundary.

use serde::{Deserialize, Serialize};

use crate::error::{FissionError, Result};

/// Upper bound on `num_results` accepted from callers.
pub const MAX_RESULTS: u32 = 100;

fn default_num_results() -> u32 {
    50
}

fn default_style() -> String {
    "professional".to_string()
}

fn default_category() -> String {
    "modern".to_string()
}

// ── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Description, seed name or keywords.
    pub prompt: String,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    /// Optional category focus (e.g. `mythology`, `nature`).
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Tone tag: professional, playful, bold, minimal.
    #[serde(default = "default_style")]
    pub style: String,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            num_results: default_num_results(),
            categories: None,
            style: default_style(),
        }
    }

    pub fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(FissionError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        if self.num_results == 0 || self.num_results > MAX_RESULTS {
            return Err(FissionError::InvalidRequest(format!(
                "num_results must be between 1 and {}",
                MAX_RESULTS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeeperRequest {
    /// The name to explore.
    pub name: String,
    /// Optional business context.
    #[serde(default)]
    pub context: String,
    /// Optional subset of dimensions (see `generator::prompts::DIMENSIONS`).
    #[serde(default)]
    pub dimensions: Option<Vec<String>>,
}

impl DeeperRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: String::new(),
            dimensions: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_dimensions(mut self, dimensions: Vec<String>) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FissionError::InvalidRequest(
                "name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Either request kind, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuggestionRequest {
    Generate(GenerateRequest),
    Deeper(DeeperRequest),
}

// ── Payloads ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameResult {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Thematic grouping of generated names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub name_ids: Option<Vec<String>>,
}

/// Payload of a `generate` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSuggestions {
    pub names: Vec<NameResult>,
    #[serde(default)]
    pub threads: Option<Vec<Thread>>,
}

impl NameSuggestions {
    /// Fill ids and categories the model left out.
    pub fn normalize(mut self) -> Self {
        for (i, entry) in self.names.iter_mut().enumerate() {
            if entry.id.trim().is_empty() {
                entry.id = format!("name_{}", i);
            }
            if entry.category.trim().is_empty() {
                entry.category = default_category();
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeeperName {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Names related to the source along one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeeperThread {
    pub dimension: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub names: Vec<DeeperName>,
}

/// Payload of a `deeper` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeeperSuggestions {
    #[serde(default)]
    pub source_name: String,
    pub threads: Vec<DeeperThread>,
}

impl DeeperSuggestions {
    /// Fill the source name and any missing ids.
    pub fn normalize(mut self, requested_name: &str) -> Self {
        if self.source_name.trim().is_empty() {
            self.source_name = requested_name.to_string();
        }
        let mut counter = 0;
        for thread in &mut self.threads {
            for entry in &mut thread.names {
                counter += 1;
                if entry.id.trim().is_empty() {
                    entry.id = format!("deeper_{}", counter);
                }
            }
        }
        self
    }
}

/// Either payload kind, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestions {
    Generate(NameSuggestions),
    Deeper(DeeperSuggestions),
}

// ── Responses ───────────────────────────────────────────────────────────────

/// Where a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    /// Served from the response cache; no upstream call.
    Cache,
    /// Fresh upstream result, now cached.
    Upstream,
    /// Canned content; the upstream was unavailable or unusable.
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub query: String,
    pub names: Vec<NameResult>,
    pub threads: Option<Vec<Thread>>,
    pub total_results: usize,
    pub source: GenerationSource,
}

impl GenerateResponse {
    pub fn new(query: impl Into<String>, payload: NameSuggestions, source: GenerationSource) -> Self {
        Self {
            query: query.into(),
            total_results: payload.names.len(),
            names: payload.names,
            threads: payload.threads,
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeeperResponse {
    pub source_name: String,
    pub threads: Vec<DeeperThread>,
    pub source: GenerationSource,
}

impl DeeperResponse {
    pub fn new(payload: DeeperSuggestions, source: GenerationSource) -> Self {
        Self {
            source_name: payload.source_name,
            threads: payload.threads,
            source,
        }
    }
}

/// A browsable name category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}
