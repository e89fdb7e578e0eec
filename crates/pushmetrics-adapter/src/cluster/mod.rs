//! Collaborators the query path delegates to.
//!
//! Resource discovery and object listing live outside this service. The
//! query engine only sees these traits; `StaticCluster` is the in-memory
//! implementation driven by the config file and used by tests.

pub mod static_cluster;

use async_trait::async_trait;

use pushmetrics_core::error::Result;
use pushmetrics_core::identity::{CustomMetricInfo, GroupVersionKind, NamespacedName};
use pushmetrics_core::protocol::values::ObjectReference;
use pushmetrics_core::selector::Selector;

pub use static_cluster::StaticCluster;

/// Resolves group/resource ambiguity (singular names, short names, empty group).
#[async_trait]
pub trait ResourceMapper: Send + Sync {
    /// Returns the info with a fully-qualified group/resource, plus its kind.
    async fn normalize(&self, info: &CustomMetricInfo) -> Result<(CustomMetricInfo, GroupVersionKind)>;
}

/// Lists names of objects matching a namespace + label selector.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    async fn list_object_names(
        &self,
        namespace: &str,
        selector: &Selector,
        info: &CustomMetricInfo,
    ) -> Result<Vec<String>>;
}

/// Builds the described-object reference carried in metric value records.
#[async_trait]
pub trait ObjectDescriber: Send + Sync {
    async fn reference_for(&self, object: &NamespacedName, info: &CustomMetricInfo) -> Result<ObjectReference>;
}
