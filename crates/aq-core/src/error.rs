//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! `#[from]` variant.

use thiserror::Error;

/// Errors raised while constructing core value types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid weight vector: {0}")]
    InvalidWeights(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `aq-core`.
pub type CoreResult<T> = Result<T, CoreError>;
