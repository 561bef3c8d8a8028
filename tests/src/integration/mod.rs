//! Cross-subsystem integration scenarios.

pub mod builtin_forms;
pub mod fixtures;
pub mod flows;
