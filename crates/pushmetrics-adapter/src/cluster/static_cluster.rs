//! Fixed, config-driven view of cluster resources and objects.

use async_trait::async_trait;

use pushmetrics_core::error::{MetricsError, Result};
use pushmetrics_core::identity::{CustomMetricInfo, GroupResource, GroupVersionKind, NamespacedName};
use pushmetrics_core::protocol::values::ObjectReference;
use pushmetrics_core::selector::{Labels, Selector};

use super::{ObjectDescriber, ObjectLister, ResourceMapper};
use crate::config::{ClusterSection, ResourceSpec};

#[derive(Debug, Clone)]
struct StaticObject {
    resource: GroupResource,
    namespace: String,
    name: String,
    labels: Labels,
}

/// In-memory resource mapper + object catalog.
///
/// Resources are matched in declaration order; the first hit wins when the
/// requested group is empty.
#[derive(Debug, Clone, Default)]
pub struct StaticCluster {
    resources: Vec<ResourceSpec>,
    objects: Vec<StaticObject>,
}

impl StaticCluster {
    pub fn new(section: &ClusterSection) -> Result<Self> {
        let mut cluster = Self {
            resources: section.resources.clone(),
            objects: Vec::with_capacity(section.objects.len()),
        };

        for o in &section.objects {
            let spec = cluster
                .resolve(&GroupResource::new(o.group.clone(), o.resource.clone()))
                .ok_or_else(|| {
                    MetricsError::BadRequest(format!(
                        "object {}/{} refers to unknown resource {:?}",
                        o.namespace, o.name, o.resource
                    ))
                })?;
            let resource = GroupResource::new(spec.group.clone(), spec.resource.clone());
            cluster.objects.push(StaticObject {
                resource,
                namespace: o.namespace.clone(),
                name: o.name.clone(),
                labels: o.labels.clone(),
            });
        }
        Ok(cluster)
    }

    fn resolve(&self, gr: &GroupResource) -> Option<&ResourceSpec> {
        let wanted = gr.resource.to_ascii_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.resources.iter().find(|r| {
            (gr.group.is_empty() || r.group == gr.group)
                && (r.resource == wanted
                    || r.singular == wanted
                    || r.short_names.iter().any(|s| *s == wanted))
        })
    }

    fn resolve_or_err(&self, gr: &GroupResource) -> Result<&ResourceSpec> {
        self.resolve(gr)
            .ok_or_else(|| MetricsError::Resolution(format!("no matches for {gr}")))
    }
}

fn kind_of(spec: &ResourceSpec) -> GroupVersionKind {
    GroupVersionKind {
        group: spec.group.clone(),
        version: spec.version.clone(),
        kind: spec.kind.clone(),
    }
}

#[async_trait]
impl ResourceMapper for StaticCluster {
    async fn normalize(&self, info: &CustomMetricInfo) -> Result<(CustomMetricInfo, GroupVersionKind)> {
        let spec = self.resolve_or_err(&info.group_resource)?;
        let mut normalized = info.clone();
        normalized.group_resource = GroupResource::new(spec.group.clone(), spec.resource.clone());
        Ok((normalized, kind_of(spec)))
    }
}

#[async_trait]
impl ObjectLister for StaticCluster {
    async fn list_object_names(
        &self,
        namespace: &str,
        selector: &Selector,
        info: &CustomMetricInfo,
    ) -> Result<Vec<String>> {
        let spec = self.resolve_or_err(&info.group_resource)?;
        let resource = GroupResource::new(spec.group.clone(), spec.resource.clone());

        Ok(self
            .objects
            .iter()
            .filter(|o| o.resource == resource)
            .filter(|o| !spec.namespaced || namespace.is_empty() || o.namespace == namespace)
            .filter(|o| selector.matches(&o.labels))
            .map(|o| o.name.clone())
            .collect())
    }
}

#[async_trait]
impl ObjectDescriber for StaticCluster {
    async fn reference_for(&self, object: &NamespacedName, info: &CustomMetricInfo) -> Result<ObjectReference> {
        let kind = kind_of(self.resolve_or_err(&info.group_resource)?);
        Ok(ObjectReference {
            api_version: kind.api_version(),
            kind: kind.kind,
            namespace: object.namespace.clone(),
            name: object.name.clone(),
        })
    }
}
