//! Error types for Loan Chat.

/// Top-level error type for the dialogue engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A final-step field failed numeric coercion.
///
/// Recoverable: the session stays at the final step so the user can retype
/// the answer. Intermediate steps are never validated — raw text is stored
/// and coerced en masse at submission time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid input for {field}. Please enter a number")]
pub struct ValidationError {
    /// Payload field name, e.g. `commercial_assets`.
    pub field: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// The prediction endpoint failed or returned something unusable.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Prediction request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status; `message` is the server's `error` field when
    /// present, else a generic fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response from prediction service: {0}")]
    InvalidResponse(String),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
