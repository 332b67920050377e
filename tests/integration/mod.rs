//! Integration test suite for sfc-inherit
//!
//! End-to-end tests that resolve real component files on disk and drive the
//! `sfc-inherit` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **inheritance**: merge semantics across single and multi-level chains
//! - **errors**: failures anywhere in a chain
//! - **aliases**: prefix and pattern alias resolution through `extends`
//! - **cli**: the `resolve` and `deps` commands

mod aliases;
mod errors;
mod inheritance;
