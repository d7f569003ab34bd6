use thiserror::Error;

use crate::data_source::SourceError;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("unsupported language '{value}', expected one of en, th")]
    InvalidLanguage { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("security id must be a UUID: '{value}'")]
    InvalidSecurityId { value: String },

    #[error("search query must not be empty")]
    EmptyQuery,
    #[error("search limit must be greater than zero")]
    ZeroLimit,
}

/// Top-level error type for facade operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Source error classification, when the failure came from a provider.
    pub fn source_kind(&self) -> Option<crate::data_source::SourceErrorKind> {
        match self {
            Self::Source(error) => Some(error.kind()),
            _ => None,
        }
    }
}
