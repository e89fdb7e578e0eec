//! Read routes for the metrics-serving host.
//!
//! - `GET /apis/custom.metrics.k8s.io/v1beta2`: catalog of known metrics
//! - `GET /apis/custom.metrics.k8s.io/v1beta2/namespaces/{ns}/{resource}/{name}/{metric}`:
//!   one object, or every object matching `labelSelector` when `name` is `*`
//! - `GET /apis/external.metrics.k8s.io/v1beta1/namespaces/{ns}/{metric}`: always empty
//!
//! Both metric routes accept an optional `metricSelector` query parameter.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use pushmetrics_core::identity::{CustomMetricInfo, ExternalMetricInfo, GroupResource, NamespacedName};
use pushmetrics_core::protocol::values::{ExternalMetricValueList, MetricValueList};
use pushmetrics_core::selector::Selector;

use super::ApiError;
use crate::app_state::AppState;
use crate::provider::{CustomMetricsProvider, ExternalMetricsProvider};

pub const CUSTOM_METRICS_GROUP_VERSION: &str = "custom.metrics.k8s.io/v1beta2";
pub const EXTERNAL_METRICS_GROUP_VERSION: &str = "external.metrics.k8s.io/v1beta1";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorQuery {
    #[serde(default)]
    pub label_selector: String,
    #[serde(default)]
    pub metric_selector: String,
}

/// List body tagged with kind/apiVersion.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listed<T> {
    kind: &'static str,
    api_version: &'static str,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    name: String,
    singular_name: String,
    namespaced: bool,
    kind: &'static str,
    verbs: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    kind: &'static str,
    api_version: &'static str,
    group_version: &'static str,
    resources: Vec<ApiResource>,
}

/// `deployments.apps` -> (`apps`, `deployments`); `pods` -> (``, `pods`).
fn parse_group_resource(segment: &str) -> GroupResource {
    match segment.split_once('.') {
        Some((resource, group)) => GroupResource::new(group, resource),
        None => GroupResource::new("", segment),
    }
}

pub async fn list_metrics(State(state): State<AppState>) -> Json<ApiResourceList> {
    let resources = state
        .provider()
        .list_all_metrics()
        .into_iter()
        .map(|info| ApiResource {
            name: format!("{}/{}", info.group_resource, info.metric),
            singular_name: String::new(),
            namespaced: info.namespaced,
            kind: "MetricValueList",
            verbs: vec!["get"],
        })
        .collect();

    Json(ApiResourceList {
        kind: "APIResourceList",
        api_version: "v1",
        group_version: CUSTOM_METRICS_GROUP_VERSION,
        resources,
    })
}

pub async fn get_namespaced_metric(
    State(state): State<AppState>,
    Path((namespace, resource, name, metric)): Path<(String, String, String, String)>,
    Query(q): Query<SelectorQuery>,
) -> Result<Json<Listed<MetricValueList>>, ApiError> {
    let info = CustomMetricInfo::new(parse_group_resource(&resource), true, metric);
    let metric_selector = Selector::parse(&q.metric_selector)?;
    let provider = state.provider();

    let list = if name == "*" {
        let selector = Selector::parse(&q.label_selector)?;
        provider
            .get_metric_by_selector(&namespace, &selector, &info, &metric_selector)
            .await?
    } else {
        let object = NamespacedName::new(namespace, name);
        let record = provider
            .get_metric_by_name(&object, &info, &metric_selector)
            .await?;
        MetricValueList { items: vec![record] }
    };

    Ok(Json(Listed {
        kind: "MetricValueList",
        api_version: CUSTOM_METRICS_GROUP_VERSION,
        body: list,
    }))
}

pub async fn get_external_metric(
    State(state): State<AppState>,
    Path((namespace, metric)): Path<(String, String)>,
    Query(q): Query<SelectorQuery>,
) -> Result<Json<Listed<ExternalMetricValueList>>, ApiError> {
    let selector = Selector::parse(&q.label_selector)?;
    let info = ExternalMetricInfo { metric };
    let list = state
        .provider()
        .get_external_metric(&namespace, &selector, &info)
        .await?;

    Ok(Json(Listed {
        kind: "ExternalMetricValueList",
        api_version: EXTERNAL_METRICS_GROUP_VERSION,
        body: list,
    }))
}
