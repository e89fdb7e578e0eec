//! pushmetrics adapter library entry.
//!
//! This crate wires the metric store, push handler, query engine, provider
//! and HTTP transport into one service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cluster;
pub mod config;
pub mod ingest;
pub mod ops;
pub mod provider;
pub mod query;
pub mod router;
pub mod store;
pub mod transport;
