//! # Shared Types Crate
//!
//! This crate contains the value types that cross subsystem boundaries in the
//! clinical-record engine.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, the actor descriptor and the
//!   request descriptor are defined once here.
//! - **Explicit Context**: no subsystem reads "who is calling" from ambient
//!   state; every gate and audit call receives an [`Actor`] and a
//!   [`RequestContext`] value.
//! - **Plaintext in Memory**: [`Payload`] is always the decrypted structured
//!   form; the sealed string never leaves the persistence mapping step.

pub mod context;
pub mod entities;

pub use context::*;
pub use entities::*;
