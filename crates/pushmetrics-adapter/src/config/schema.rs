use serde::Deserialize;

use pushmetrics_core::error::{MetricsError, Result};
use pushmetrics_core::identity::GroupResource;
use pushmetrics_core::selector::Labels;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    pub version: u32,

    #[serde(default)]
    pub adapter: AdapterSection,

    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub cluster: ClusterSection,
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.adapter.validate()?;
        self.catalog.validate()?;
        self.cluster.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_push_path")]
    pub push_path: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for AdapterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            push_path: default_push_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl AdapterSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(MetricsError::BadRequest(format!(
                "adapter.listen must be a valid SocketAddr: {}",
                self.listen
            )));
        }
        if !self.push_path.starts_with('/') || self.push_path.len() < 2 {
            return Err(MetricsError::BadRequest(
                "adapter.push_path must start with '/' and not be the root".into(),
            ));
        }
        if matches!(self.push_path.as_str(), "/healthz" | "/readyz") || self.push_path.starts_with("/apis") {
            return Err(MetricsError::BadRequest(format!(
                "adapter.push_path collides with a built-in route: {}",
                self.push_path
            )));
        }
        if !(1024..=64 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(MetricsError::BadRequest(
                "adapter.max_body_bytes must be between 1024 and 67108864".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_push_path() -> String {
    "/custom-metrics".into()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Group/resource under which stored metrics are advertised.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    #[serde(default)]
    pub group: String,

    #[serde(default = "default_catalog_resource")]
    pub resource: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            group: String::new(),
            resource: default_catalog_resource(),
        }
    }
}

impl CatalogSection {
    pub fn validate(&self) -> Result<()> {
        if self.resource.is_empty() {
            return Err(MetricsError::BadRequest("catalog.resource must not be empty".into()));
        }
        Ok(())
    }

    pub fn group_resource(&self) -> GroupResource {
        GroupResource::new(self.group.clone(), self.resource.clone())
    }
}

fn default_catalog_resource() -> String {
    "pods".into()
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClusterSection {
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,

    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

impl ClusterSection {
    pub fn validate(&self) -> Result<()> {
        for r in &self.resources {
            let names = std::iter::once(&r.resource)
                .chain(std::iter::once(&r.singular))
                .chain(r.short_names.iter());
            for n in names {
                if n.chars().any(|c| c.is_ascii_uppercase()) {
                    return Err(MetricsError::BadRequest(format!(
                        "cluster.resources: resource names must be lowercase: {n}"
                    )));
                }
            }
            if r.resource.is_empty() || r.kind.is_empty() || r.version.is_empty() {
                return Err(MetricsError::BadRequest(
                    "cluster.resources: resource, version and kind are required".into(),
                ));
            }
        }
        for o in &self.objects {
            if o.name.is_empty() {
                return Err(MetricsError::BadRequest("cluster.objects: name is required".into()));
            }
        }
        Ok(())
    }
}

/// One resource type known to the mapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceSpec {
    #[serde(default)]
    pub group: String,
    pub version: String,
    /// Plural name, e.g. `pods`.
    pub resource: String,
    #[serde(default)]
    pub singular: String,
    pub kind: String,
    #[serde(default = "default_true")]
    pub namespaced: bool,
    #[serde(default)]
    pub short_names: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// One listable object with its labels.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    #[serde(default)]
    pub group: String,
    pub resource: String,
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
}
