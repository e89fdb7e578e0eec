//! Push path: decode a batch once, then apply it pair by pair.

use std::sync::Arc;

use bytes::Bytes;

use pushmetrics_core::error::Result;
use pushmetrics_core::protocol::ingest::{decode_ingest, IngestBatch};

use crate::store::MetricStore;

/// Applies pushed batches to the shared store.
#[derive(Clone)]
pub struct IngestHandler {
    store: Arc<MetricStore>,
}

impl IngestHandler {
    pub fn new(store: Arc<MetricStore>) -> Self {
        Self { store }
    }

    /// Decode `body` and apply it. A body that fails to decode or validate
    /// writes nothing.
    pub fn ingest(&self, body: Bytes) -> Result<usize> {
        let batch = decode_ingest(body)?;
        Ok(self.apply(&batch))
    }

    /// Write every pair of an already decoded batch; returns the pair count.
    ///
    /// Each metric name is written independently, there is no atomicity
    /// across names.
    pub fn apply(&self, batch: &IngestBatch) -> usize {
        let key = batch.object().object_key();
        for (metric_name, value) in &batch.metrics {
            self.store.ensure(metric_name).set(key.as_str(), *value);
        }

        tracing::debug!(object = %key, metrics = batch.metrics.len(), "applied push batch");
        batch.metrics.len()
    }
}
