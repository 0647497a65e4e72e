/// Errors produced by history operations.
///
/// Recording and reading never fail; these cover configuration loading and
/// export serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for history results.
pub type HistoryResult<T> = Result<T, HistoryError>;
