//! # Adapters

pub mod ledger;

pub use ledger::InMemoryAuditLedger;
