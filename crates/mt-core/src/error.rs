//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers only the
//! value-level failures that can occur in this crate (parsing labels,
//! constructing a clock).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `mt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
