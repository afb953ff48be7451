//! Error types for the unibot engine
//!
//! One enum covers the whole taxonomy: validation failures surface to the
//! caller, storage failures surface after in-memory state is updated,
//! coordinate parse failures are downgraded to "no geographic data" at the
//! call site, and provider failures propagate without being retried.

use thiserror::Error;

/// Main error type for the assistant engine
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Bad or missing query input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Corpus persistence read/write failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Malformed coordinate strings; callers downgrade this to `None`
    #[error("Malformed coordinates '{raw}': {reason}")]
    CoordinateParse { raw: String, reason: String },

    /// Generative provider call failures
    #[error("Provider error: {0}")]
    Provider(String),

    /// Generative provider timeouts
    #[error("Provider request timed out after {duration_ms}ms")]
    ProviderTimeout { duration_ms: u64 },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, AssistantError>;

impl AssistantError {
    /// True for failures of the external generative provider.
    ///
    /// The CLI renders these as an apology line instead of a backtrace.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            AssistantError::Provider(_) | AssistantError::ProviderTimeout { .. }
        )
    }
}
