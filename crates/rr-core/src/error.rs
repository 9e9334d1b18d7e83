//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `RrError` via `From` impls or keep them separate and wrap `RrError` as one
//! variant.  Both patterns are acceptable; prefer whichever keeps error sites
//! clean.

use thiserror::Error;

/// The top-level error type for `rr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RrError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rr-*` crates.
pub type RrResult<T> = Result<T, RrError>;
