//! # Bean Registry Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs      # Shop components shared by the flows
//!     ├── transactions.rs  # Proxy bracketing: begin/commit/rollback
//!     ├── registry.rs      # Warm-up, lookup, dynamic invocation
//!     └── telemetry.rs     # Logging bootstrap around a registry
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bean-tests
//!
//! # By flow
//! cargo test -p bean-tests integration::transactions::
//! cargo test -p bean-tests integration::registry::
//! ```

#![allow(dead_code)]

pub mod integration;
