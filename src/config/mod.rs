//! Configuration loading.
//!
//! Config lives in `~/.fission/config.json`. Every section is optional and
//! falls back to defaults. Environment variables override file values after
//! loading (see [`Config::apply_env_overrides`]).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_TTL_SECS;
use crate::error::{FissionError, Result};
use crate::providers::anthropic::{ANTHROPIC_API_BASE, DEFAULT_ANTHROPIC_MODEL};

/// TTL for successfully parsed generation results (2 hours).
pub const DEFAULT_GENERATION_TTL_SECS: i64 = 7200;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Upstream generation service settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key. Prefer the environment over storing it here.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: ANTHROPIC_API_BASE.to_string(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: 4096,
            timeout_secs: 120,
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Record directory. Defaults to `~/.fission/cache`.
    pub dir: Option<PathBuf>,
    /// TTL for `store` calls that don't pass one.
    pub default_ttl_secs: i64,
    /// TTL the generator uses for parsed upstream results.
    pub generation_ttl_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            default_ttl_secs: DEFAULT_TTL_SECS,
            generation_ttl_secs: DEFAULT_GENERATION_TTL_SECS,
        }
    }
}

impl Config {
    /// Base directory: `~/.fission`.
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fission")
    }

    /// Default config file path: `~/.fission/config.json`.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load config with environment overrides applied.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// missing the defaults are used.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(FissionError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from_path(path)?
            }
            None => {
                let path = Self::path();
                if path.exists() {
                    Self::load_from_path(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a config file without applying environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FissionError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            FissionError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply `FISSION_*` environment overrides.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `FISSION_SERVER_BIND` | `server.bind` |
    /// | `FISSION_SERVER_PORT` | `server.port` |
    /// | `FISSION_PROVIDER_MODEL` | `provider.model` |
    /// | `FISSION_PROVIDER_API_BASE` | `provider.api_base` |
    /// | `FISSION_CACHE_DIR` | `cache.dir` |
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(bind) = get("FISSION_SERVER_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = get("FISSION_SERVER_PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid FISSION_SERVER_PORT"),
            }
        }
        if let Some(model) = get("FISSION_PROVIDER_MODEL") {
            self.provider.model = model;
        }
        if let Some(base) = get("FISSION_PROVIDER_API_BASE") {
            self.provider.api_base = base;
        }
        if let Some(dir) = get("FISSION_CACHE_DIR") {
            self.cache.dir = Some(PathBuf::from(dir));
        }
    }

    /// Resolve the API key: config → `FISSION_API_KEY` → `ANTHROPIC_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_from(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.provider
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup("FISSION_API_KEY").filter(|k| !k.trim().is_empty()))
            .or_else(|| lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()))
    }

    /// Cache directory, falling back to `~/.fission/cache`.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache
            .dir
            .clone()
            .unwrap_or_else(|| Self::dir().join("cache"))
    }
}
