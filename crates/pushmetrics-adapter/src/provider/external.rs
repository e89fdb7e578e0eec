use async_trait::async_trait;

use pushmetrics_core::error::Result;
use pushmetrics_core::identity::ExternalMetricInfo;
use pushmetrics_core::protocol::values::ExternalMetricValueList;
use pushmetrics_core::selector::Selector;

use super::ExternalMetricsProvider;

/// External metrics are not supported: nothing listed, every query empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExternalMetrics;

#[async_trait]
impl ExternalMetricsProvider for NoExternalMetrics {
    async fn get_external_metric(
        &self,
        _namespace: &str,
        _metric_selector: &Selector,
        _info: &ExternalMetricInfo,
    ) -> Result<ExternalMetricValueList> {
        Ok(ExternalMetricValueList::default())
    }

    fn list_all_external_metrics(&self) -> Vec<ExternalMetricInfo> {
        Vec::new()
    }
}
