//! # Domain Module
//!
//! Schema vocabulary, registry keys and error types.

pub mod definition;
pub mod errors;
pub mod schema;

pub use definition::*;
pub use errors::*;
pub use schema::*;
