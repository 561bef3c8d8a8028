//! # Ports Module
//!
//! The registry is populated from a code-level table and has no driven
//! dependencies, so only the inbound API is defined here.

pub mod inbound;

pub use inbound::SchemaRegistryApi;
