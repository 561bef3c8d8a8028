//! # Algorithms
//!
//! Pure, CPU-bound steps over schemas and payloads.

pub mod describe;
pub mod migration;
pub mod validator;

pub use describe::{describe_definition, describe_schema};
pub use migration::run_chain;
pub use validator::{validate_payload, ROOT_PATH};
