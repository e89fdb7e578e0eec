//! pushmetrics core: identity types, quantities, selectors, wire formats and
//! the shared error surface.
//!
//! This crate carries no transport or runtime dependencies so the adapter,
//! tests, and tooling can share the same contracts.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `MetricsError`/`Result` so malformed pushes or selectors never
//! crash the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod identity;
pub mod protocol;
pub mod quantity;
pub mod selector;

/// Shared result type.
pub use error::{ErrorCode, MetricsError, Result};
