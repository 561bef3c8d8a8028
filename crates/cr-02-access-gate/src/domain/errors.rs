//! # Domain Errors
//!
//! Access-gate outcomes. Messages name the role, module or unit mismatch
//! and nothing else.

use thiserror::Error;

/// Access denied or target unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The actor may not perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Target does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Target is soft-deleted.
    #[error("{0} has been deleted")]
    Gone(&'static str),

    /// Directory lookup failed.
    #[error("Directory unavailable: {0}")]
    Directory(String),
}
