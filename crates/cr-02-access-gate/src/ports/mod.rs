//! # Ports Module
//!
//! - `inbound` - what the gate offers
//! - `outbound` - what the gate needs

pub mod inbound;
pub mod outbound;

pub use inbound::AccessGateApi;
pub use outbound::Directory;
