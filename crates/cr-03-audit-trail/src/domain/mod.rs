//! # Domain Module
//!
//! Audit records, snapshot masking and diffing.

pub mod errors;
pub mod record;
pub mod snapshot;

pub use errors::*;
pub use record::*;
pub use snapshot::*;
