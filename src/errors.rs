use thiserror::Error;

/// Failures of the surfaces around the predicate. Comparing values never fails.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("io error: {0}")]
    Io(String),

    /// Malformed or out-of-range comparison options.
    #[error("invalid options: {0}")]
    Options(String),
}

impl From<serde_json::Error> for EvalError {
    fn from(e: serde_json::Error) -> Self {
        EvalError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
