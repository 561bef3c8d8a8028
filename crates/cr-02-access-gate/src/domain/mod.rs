//! # Domain Module
//!
//! Directory entities, access errors and the pure policy.

pub mod entities;
pub mod errors;
pub mod policy;

pub use entities::*;
pub use errors::*;
pub use policy::*;
