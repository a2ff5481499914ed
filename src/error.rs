//! Error types for Fission.
//!
//! The library reports every failure through [`FissionError`]. Cache and
//! upstream failures are recovered internally and never reach callers of the
//! generator; what remains visible are configuration problems, caller misuse
//! (invalid requests or descriptors) and the provider errors that the
//! generator turns into fallback content.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FissionError>;

#[derive(Debug, Error)]
pub enum FissionError {
    /// Configuration file or environment could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A cache key descriptor could not be built. This is a caller bug.
    #[error("Invalid cache descriptor: {0}")]
    InvalidDescriptor(String),

    /// The inbound request is structurally invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic upstream failure (network, unexpected status, bad body).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Upstream rejected the credential (401/403).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Upstream asked us to slow down (429).
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Upstream is down or overloaded (5xx).
    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl FissionError {
    /// Returns `true` for errors caused by the caller rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
