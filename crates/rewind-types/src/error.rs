use thiserror::Error;

/// Errors produced by value operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
