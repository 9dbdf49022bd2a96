//! Workspace error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `RailError` via `From` impls, or keep them separate and wrap `RailError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

use crate::{StationId, UnitId};

/// The top-level error type for `rail-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RailError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rail-*` crates.
pub type RailResult<T> = Result<T, RailError>;
