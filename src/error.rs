//! Error types for sortviz.
//!
//! Every fallible operation returns `Result<T, VizError>` instead of
//! panicking. Cancellation is modelled as an error variant so it travels
//! through `?` from the innermost suspension point back to the controller.

use thiserror::Error;

/// Result type alias for sortviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all sortviz operations.
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// No adapter registered under the requested identifier.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Data size label not recognised.
    #[error("Unknown data size '{0}' (expected small, medium, large or huge)")]
    UnknownDataSize(String),

    // ===== I/O Errors =====
    /// File or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== Run Errors =====
    /// An algorithm adapter failed mid-run.
    #[error("Algorithm '{algorithm}' failed: {message}")]
    AlgorithmFailed {
        /// Identifier of the failing adapter.
        algorithm: String,
        /// What went wrong.
        message: String,
    },

    /// The adapter kept producing steps past the configured limit.
    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded {
        /// Configured maximum number of steps.
        limit: u64,
    },

    /// The run was cancelled by a reset.
    #[error("Run cancelled")]
    Cancelled,
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an algorithm failure for the given adapter.
    #[must_use]
    pub fn algorithm(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AlgorithmFailed {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a cancellation rather than a failure.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
