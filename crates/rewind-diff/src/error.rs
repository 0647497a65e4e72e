//! Error types for the diff crate.

/// Errors that can occur while decoding a diff from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The input was not a JSON object.
    #[error("expected a diff object, got {0}")]
    NotADiff(&'static str),

    /// A `_diff` leaf whose body is not an object.
    #[error("malformed leaf at `{path}`: {reason}")]
    MalformedLeaf { path: String, reason: String },

    /// An object diff with no members.
    #[error("empty object diff at `{0}`")]
    EmptyObjectDiff(String),

    /// JSON text could not be parsed.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
