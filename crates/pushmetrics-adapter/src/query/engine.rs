use std::sync::Arc;

use futures_util::future::try_join_all;

use pushmetrics_core::error::{MetricsError, Result};
use pushmetrics_core::identity::{CustomMetricInfo, NamespacedName};
use pushmetrics_core::protocol::values::{MetricIdentifier, MetricValue, MetricValueList, MetricValueRecord};
use pushmetrics_core::selector::{LabelSelector, Selector};

use crate::cluster::{ObjectDescriber, ObjectLister, ResourceMapper};
use crate::store::MetricStore;

/// Joins stored values with collaborator answers.
///
/// Stateless: every call is a read-only pass over the current store plus
/// collaborator calls, with no retries.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<MetricStore>,
    mapper: Arc<dyn ResourceMapper>,
    lister: Arc<dyn ObjectLister>,
    describer: Arc<dyn ObjectDescriber>,
}

impl QueryEngine {
    pub fn new(
        store: Arc<MetricStore>,
        mapper: Arc<dyn ResourceMapper>,
        lister: Arc<dyn ObjectLister>,
        describer: Arc<dyn ObjectDescriber>,
    ) -> Self {
        Self {
            store,
            mapper,
            lister,
            describer,
        }
    }

    /// Value of `info` for a single object.
    pub async fn get_by_identity(
        &self,
        info: &CustomMetricInfo,
        object: &NamespacedName,
        metric_selector: &Selector,
    ) -> Result<MetricValueRecord> {
        let (info, value) = self.value_for(info, object).await?;
        self.record_for(value, object, &info, metric_selector).await
    }

    /// Values of `info` for every object the lister matches.
    ///
    /// Objects with no recorded value are skipped; any other failure aborts
    /// the whole query. Items keep the listing order.
    pub async fn get_by_selector(
        &self,
        namespace: &str,
        object_selector: &Selector,
        info: &CustomMetricInfo,
        metric_selector: &Selector,
    ) -> Result<MetricValueList> {
        let names = self
            .lister
            .list_object_names(namespace, object_selector, info)
            .await?;
        let listed = names.len();

        let lookups = names.into_iter().map(|name| {
            let object = NamespacedName::new(namespace, name);
            async move {
                match self.value_for(info, &object).await {
                    Ok((info, value)) => self
                        .record_for(value, &object, &info, metric_selector)
                        .await
                        .map(Some),
                    Err(e) if e.is_not_found() => Ok(None),
                    Err(e) => Err(e),
                }
            }
        });

        let items: Vec<MetricValueRecord> = match try_join_all(lookups).await {
            Ok(found) => found.into_iter().flatten().collect(),
            Err(e) => {
                tracing::warn!(%namespace, metric = %info.metric, error = %e, "selector query aborted");
                return Err(e);
            }
        };

        tracing::debug!(
            %namespace,
            metric = %info.metric,
            selector = %object_selector,
            listed,
            returned = items.len(),
            "selector query"
        );
        Ok(MetricValueList { items })
    }

    /// Normalize the metric identity and fetch the stored value.
    async fn value_for(
        &self,
        info: &CustomMetricInfo,
        object: &NamespacedName,
    ) -> Result<(CustomMetricInfo, MetricValue)> {
        let (info, _kind) = self.mapper.normalize(info).await?;
        let not_found = || MetricsError::metric_not_found(&info.group_resource, &info.metric, &object.name);

        let metric = self.store.lookup(&info.metric).ok_or_else(not_found)?;
        let value = metric.get(&object.object_key()).ok_or_else(not_found)?;
        Ok((info, value))
    }

    async fn record_for(
        &self,
        value: MetricValue,
        object: &NamespacedName,
        info: &CustomMetricInfo,
        metric_selector: &Selector,
    ) -> Result<MetricValueRecord> {
        let described_object = self.describer.reference_for(object, info).await?;

        let rendered = metric_selector.to_string();
        let selector = if rendered.is_empty() {
            None
        } else {
            Some(LabelSelector::parse(&rendered)?)
        };

        Ok(MetricValueRecord {
            described_object,
            metric: MetricIdentifier {
                name: info.metric.clone(),
                selector,
            },
            timestamp: value.time,
            value: value.value,
        })
    }
}
