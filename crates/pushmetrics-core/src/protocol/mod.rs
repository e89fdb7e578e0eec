//! Wire formats.
//!
//! - Push lane: JSON batches of integer values for one object.
//! - Query lane: metric value records returned to the metrics-serving host.
//!
//! Decoders are panic-free: malformed input is reported as `MetricsError`
//! and never partially applied.

pub mod ingest;
pub mod values;
