//! Provider surface consumed by the metrics-serving host.
//!
//! The host requires every provider to expose both custom (object-bound) and
//! external metrics. Only custom metrics are backed by the store; external
//! metrics go through `NoExternalMetrics`.

pub mod external;

use std::sync::Arc;

use async_trait::async_trait;

use pushmetrics_core::error::Result;
use pushmetrics_core::identity::{CustomMetricInfo, ExternalMetricInfo, NamespacedName};
use pushmetrics_core::protocol::values::{ExternalMetricValueList, MetricValueList, MetricValueRecord};
use pushmetrics_core::selector::Selector;

use crate::query::QueryEngine;
use crate::store::{MetricStore, MetricsRegistry};

pub use external::NoExternalMetrics;

#[async_trait]
pub trait CustomMetricsProvider: Send + Sync {
    fn list_all_metrics(&self) -> Vec<CustomMetricInfo>;

    async fn get_metric_by_name(
        &self,
        object: &NamespacedName,
        info: &CustomMetricInfo,
        metric_selector: &Selector,
    ) -> Result<MetricValueRecord>;

    async fn get_metric_by_selector(
        &self,
        namespace: &str,
        selector: &Selector,
        info: &CustomMetricInfo,
        metric_selector: &Selector,
    ) -> Result<MetricValueList>;
}

#[async_trait]
pub trait ExternalMetricsProvider: Send + Sync {
    async fn get_external_metric(
        &self,
        namespace: &str,
        metric_selector: &Selector,
        info: &ExternalMetricInfo,
    ) -> Result<ExternalMetricValueList>;

    fn list_all_external_metrics(&self) -> Vec<ExternalMetricInfo>;
}

/// Store-backed provider.
#[derive(Clone)]
pub struct MetricsProvider {
    store: Arc<MetricStore>,
    registry: MetricsRegistry,
    engine: QueryEngine,
    external: Arc<dyn ExternalMetricsProvider>,
}

impl MetricsProvider {
    pub fn new(store: Arc<MetricStore>, registry: MetricsRegistry, engine: QueryEngine) -> Self {
        Self {
            store,
            registry,
            engine,
            external: Arc::new(NoExternalMetrics),
        }
    }
}

#[async_trait]
impl CustomMetricsProvider for MetricsProvider {
    /// Built from the live key set, so newly pushed metrics show up at once.
    fn list_all_metrics(&self) -> Vec<CustomMetricInfo> {
        self.registry.build_catalog(&self.store)
    }

    async fn get_metric_by_name(
        &self,
        object: &NamespacedName,
        info: &CustomMetricInfo,
        metric_selector: &Selector,
    ) -> Result<MetricValueRecord> {
        tracing::debug!(%object, %info, "get metric by name");
        self.engine.get_by_identity(info, object, metric_selector).await
    }

    async fn get_metric_by_selector(
        &self,
        namespace: &str,
        selector: &Selector,
        info: &CustomMetricInfo,
        metric_selector: &Selector,
    ) -> Result<MetricValueList> {
        self.engine
            .get_by_selector(namespace, selector, info, metric_selector)
            .await
    }
}

#[async_trait]
impl ExternalMetricsProvider for MetricsProvider {
    async fn get_external_metric(
        &self,
        namespace: &str,
        metric_selector: &Selector,
        info: &ExternalMetricInfo,
    ) -> Result<ExternalMetricValueList> {
        self.external
            .get_external_metric(namespace, metric_selector, info)
            .await
    }

    fn list_all_external_metrics(&self) -> Vec<ExternalMetricInfo> {
        self.external.list_all_external_metrics()
    }
}
