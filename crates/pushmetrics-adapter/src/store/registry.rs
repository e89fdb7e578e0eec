//! Catalog of known metrics.

use pushmetrics_core::identity::{CustomMetricInfo, GroupResource};

use super::MetricStore;

/// Builds the metric descriptors advertised to the metrics-serving host.
///
/// The catalog is recomputed from the live key set on every call, so a
/// metric becomes listable as soon as its first value is pushed.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    group_resource: GroupResource,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new(GroupResource::pods())
    }
}

impl MetricsRegistry {
    pub fn new(group_resource: GroupResource) -> Self {
        Self { group_resource }
    }

    /// One namespaced descriptor per stored metric name, sorted by name.
    pub fn build_catalog(&self, store: &MetricStore) -> Vec<CustomMetricInfo> {
        store
            .metric_names()
            .into_iter()
            .map(|name| CustomMetricInfo::new(self.group_resource.clone(), true, name))
            .collect()
    }
}
