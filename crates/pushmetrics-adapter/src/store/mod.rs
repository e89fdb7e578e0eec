//! In-memory metric storage.
//!
//! `MetricStore` maps metric names to per-metric value tables. Tables are
//! created on first push and live as long as the store; nothing is evicted.

pub mod metric;
pub mod registry;

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use pushmetrics_core::protocol::values::MetricValue;

pub use metric::Metric;
pub use registry::MetricsRegistry;

/// Full dump: metric name -> object key -> latest value.
pub type StoreSnapshot = BTreeMap<String, BTreeMap<String, MetricValue>>;

#[derive(Debug, Default)]
pub struct MetricStore {
    metrics: DashMap<String, Arc<Metric>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self {
            metrics: DashMap::new(),
        }
    }

    /// Return the table for `metric_name`, creating it if absent.
    ///
    /// Creation goes through the shard's entry lock: concurrent callers for
    /// the same name all get the one installed, fully built table.
    pub fn ensure(&self, metric_name: &str) -> Arc<Metric> {
        if let Some(m) = self.metrics.get(metric_name) {
            return Arc::clone(m.value());
        }
        let entry = self
            .metrics
            .entry(metric_name.to_string())
            .or_insert_with(|| Arc::new(Metric::new()));
        Arc::clone(entry.value())
    }

    pub fn lookup(&self, metric_name: &str) -> Option<Arc<Metric>> {
        self.metrics.get(metric_name).map(|m| Arc::clone(m.value()))
    }

    /// Sorted snapshot of the known metric names.
    pub fn metric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.metrics.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Ordered dump of every table. Each table is copied under its own read
    /// lock; there is no cross-metric consistency.
    pub fn snapshot(&self) -> StoreSnapshot {
        let tables: Vec<(String, Arc<Metric>)> = self
            .metrics
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect();

        tables
            .into_iter()
            .map(|(name, metric)| (name, metric.snapshot()))
            .collect()
    }
}
