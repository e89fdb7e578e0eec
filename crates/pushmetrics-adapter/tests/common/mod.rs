//! Shared fixtures for adapter integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use pushmetrics_adapter::cluster::StaticCluster;
use pushmetrics_adapter::config::{self, AdapterConfig};
use pushmetrics_adapter::query::QueryEngine;
use pushmetrics_adapter::store::MetricStore;

pub const CLUSTER_YAML: &str = r#"
version: 1
cluster:
  resources:
    - { version: "v1", resource: "pods", singular: "pod", kind: "Pod", short_names: ["po"] }
    - { group: "apps", version: "v1", resource: "deployments", singular: "deployment", kind: "Deployment" }
  objects:
    - { resource: "pods", namespace: "default", name: "a", labels: { app: "web" } }
    - { resource: "pods", namespace: "default", name: "b", labels: { app: "web" } }
    - { resource: "pods", namespace: "default", name: "c", labels: { app: "web", tier: "edge" } }
    - { resource: "pods", namespace: "default", name: "db-0", labels: { app: "db" } }
    - { resource: "pods", namespace: "other", name: "a", labels: { app: "web" } }
"#;

pub fn config() -> AdapterConfig {
    config::load_from_str(CLUSTER_YAML).expect("fixture config must parse")
}

pub fn engine(store: Arc<MetricStore>) -> QueryEngine {
    let cluster = Arc::new(StaticCluster::new(&config().cluster).unwrap());
    QueryEngine::new(store, cluster.clone(), cluster.clone(), cluster)
}
