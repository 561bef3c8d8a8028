//! # Adapters
//!
//! In-memory store and clocks implementing the outbound ports.

pub mod clock;
pub mod memory;

pub use clock::{FixedTimeSource, SystemTimeSource};
pub use memory::InMemoryEntryStore;
