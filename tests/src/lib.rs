//! # Clinical-Record Test Suite
//!
//! Cross-subsystem scenarios driven through the wired engine
//! ([`engine_runtime::EngineContainer`]), touching only public ports.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs       # directory seeding, actors, request descriptors
//!     ├── flows.rs          # create / reject / upgrade / isolation scenarios
//!     └── builtin_forms.rs  # the shipped clinical forms end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cr-tests
//! cargo test -p cr-tests integration::flows::
//! ```

pub mod integration;
