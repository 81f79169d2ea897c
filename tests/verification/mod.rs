//! End-to-end verification tests for tronpay.
//!
//! ## Test Categories
//!
//! 1. **Properties**: codec and converter laws checked with proptest
//! 2. **Scenarios**: indexer responses run through the full verifier
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test verification
//! cargo test --test verification properties
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod fixtures;
mod properties;
mod scenarios;
