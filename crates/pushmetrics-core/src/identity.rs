//! Object and metric identity types.
//!
//! These mirror the shapes the metrics-serving host hands to providers: a
//! group/resource pair, the metric descriptor built on top of it, and the
//! namespaced object name used to key stored values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// API group + resource (e.g. `""`/`"pods"`, `"apps"`/`"deployments"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GroupResource {
    #[serde(default)]
    pub group: String,
    pub resource: String,
}

impl GroupResource {
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
        }
    }

    /// The core-group pods resource.
    pub fn pods() -> Self {
        Self::new("", "pods")
    }
}

impl fmt::Display for GroupResource {
    /// `resource` for the core group, `resource.group` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// Fully-qualified kind returned by the resource mapper.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    /// `version` for the core group, `group/version` otherwise.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

/// Descriptor of a custom (object-bound) metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomMetricInfo {
    pub group_resource: GroupResource,
    pub namespaced: bool,
    pub metric: String,
}

impl CustomMetricInfo {
    pub fn new(group_resource: GroupResource, namespaced: bool, metric: impl Into<String>) -> Self {
        Self {
            group_resource,
            namespaced,
            metric: metric.into(),
        }
    }
}

impl fmt::Display for CustomMetricInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespaced {
            write!(f, "{}/{}(namespaced)", self.group_resource, self.metric)
        } else {
            write!(f, "{}/{}", self.group_resource, self.metric)
        }
    }
}

/// Descriptor of an external (non-object) metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalMetricInfo {
    pub metric: String,
}

/// Namespace + name of a single object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl NamespacedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Key under which this object's values are stored: `"<namespace>/<name>"`.
    ///
    /// Unique per object as long as `namespace` has no `/`; the push path
    /// rejects such namespaces.
    pub fn object_key(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
