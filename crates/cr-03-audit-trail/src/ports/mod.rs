//! # Ports Module

pub mod inbound;
pub mod outbound;

pub use inbound::AuditTrailApi;
pub use outbound::AuditStore;
