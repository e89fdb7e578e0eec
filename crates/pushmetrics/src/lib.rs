//! Top-level facade crate for pushmetrics.
//!
//! Re-exports core types and the adapter library so users can depend on a single crate.

pub mod core {
    pub use pushmetrics_core::*;
}

pub mod adapter {
    pub use pushmetrics_adapter::*;
}
