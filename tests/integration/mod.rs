//! Integration test suite for barbersbar-update
//!
//! End-to-end tests against a local mock HTTP server (wiremock) and the
//! compiled `barbersbar-update` binary (assert_cmd).
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **fetch**: HTTP fetching, manifest validation and check cycles
//! - **commands**: CLI commands run as a subprocess

mod commands;
mod fetch;
