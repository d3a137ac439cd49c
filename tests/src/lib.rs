//! # Crypto-Guardian Test Suite
//!
//! Unified test crate for cross-component custody scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Shared fixtures (service + tokens + manual clock)
//! └── integration/      # Cross-component custody scenarios
//!     ├── custody_lifecycle.rs
//!     ├── fee_treasury.rs
//!     └── release_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p guardian-tests
//!
//! # By category
//! cargo test -p guardian-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
