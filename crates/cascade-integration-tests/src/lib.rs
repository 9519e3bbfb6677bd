//! Integration tests for the Cascade workspace.
//!
//! This crate contains no library code. The `tests/` directory holds
//! end-to-end scenarios that drive the distribution engine and the
//! reporting layer through the same database, the way the daemon does.
//!
//! Run them with:
//!
//! ```text
//! cargo test -p cascade-integration-tests
//! ```
