//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `PmError` via `From` impls or wrap `PmError` as one variant.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `pm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PmError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown behavior group tag {0:?}")]
    UnknownGroup(String),
}

/// Shorthand result type for all `pm-*` crates.
pub type PmResult<T> = Result<T, PmError>;
