//! Error taxonomy for score calculation.
//!
//! Every calculator rejects out-of-contract input with one of these variants;
//! inputs are never clamped or silently coerced into range.

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// A numeric field fell outside its plausible range.
    #[error("{field} must be within {allowed}")]
    OutOfRange {
        field: &'static str,
        allowed: String,
    },
    /// A field held a literal outside its enumeration or a wrong type.
    #[error("{field} must be {allowed}")]
    InvalidValue { field: String, allowed: String },
    /// A cross-field constraint failed (e.g. HDL exceeding total cholesterol).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The request body did not deserialize into the calculator's request type.
    #[error("invalid request body: {0}")]
    Malformed(String),
    /// No calculator is registered under the requested id.
    #[error("unknown score id: {0}")]
    UnknownScore(String),
}

impl ScoreError {
    /// The request field a single-field failure can be blamed on, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ScoreError::OutOfRange { field, .. } => Some(field),
            ScoreError::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type ScoreResult<T> = std::result::Result<T, ScoreError>;
