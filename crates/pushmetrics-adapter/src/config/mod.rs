//! Adapter config loader (strict parsing).

pub mod schema;

use std::fs;

use pushmetrics_core::error::{MetricsError, Result};

pub use schema::{AdapterConfig, AdapterSection, CatalogSection, ClusterSection, ObjectSpec, ResourceSpec};

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "PUSHMETRICS_CONFIG";

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "pushmetrics.yaml";

/// Path from `PUSHMETRICS_CONFIG`, falling back to `pushmetrics.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<AdapterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AdapterConfig> {
    let cfg: AdapterConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
