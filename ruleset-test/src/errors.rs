use thiserror::Error;

/// Result type alias for rule set test operations
pub type Result<T, E = RuleSetTestError> = std::result::Result<T, E>;

/// Errors that can occur while building or submitting a rule set test
#[derive(Error, Debug)]
pub enum RuleSetTestError {
    /// Input shape violation. Raised during eager validation, before any
    /// output is produced.
    #[error("invalid input: expected {expected}, found {found}: {value}")]
    InvalidInput {
        expected: &'static str,
        found: &'static str,
        value: String,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request to rule testing endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response without a `matchmakingResults` attribute.
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
