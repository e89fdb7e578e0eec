//! Shared application state for the adapter.
//!
//! Owns the metric store for the life of the server and wires the push
//! handler, the query engine, and the provider around it. Collaborators are
//! injectable; `new` uses the config-driven `StaticCluster`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pushmetrics_core::error::Result;

use crate::cluster::{ObjectDescriber, ObjectLister, ResourceMapper, StaticCluster};
use crate::config::AdapterConfig;
use crate::ingest::IngestHandler;
use crate::provider::MetricsProvider;
use crate::query::QueryEngine;
use crate::store::{MetricStore, MetricsRegistry};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<MetricStore>,
    provider: Arc<MetricsProvider>,
}

struct AppStateInner {
    cfg: AdapterConfig,
    ingest: IngestHandler,
    draining: AtomicBool,
}

impl AppState {
    /// Build application state with the in-memory cluster from `cfg.cluster`.
    /// Returns Result so main can report a bad cluster section instead of panicking.
    pub fn new(cfg: AdapterConfig) -> Result<Self> {
        let cluster = Arc::new(StaticCluster::new(&cfg.cluster)?);
        tracing::info!(
            resources = cfg.cluster.resources.len(),
            objects = cfg.cluster.objects.len(),
            "static cluster loaded"
        );
        Ok(Self::with_collaborators(
            cfg,
            cluster.clone(),
            cluster.clone(),
            cluster,
        ))
    }

    /// Build application state around caller-supplied collaborators.
    pub fn with_collaborators(
        cfg: AdapterConfig,
        mapper: Arc<dyn ResourceMapper>,
        lister: Arc<dyn ObjectLister>,
        describer: Arc<dyn ObjectDescriber>,
    ) -> Self {
        let store = Arc::new(MetricStore::new());
        let registry = MetricsRegistry::new(cfg.catalog.group_resource());
        let engine = QueryEngine::new(Arc::clone(&store), mapper, lister, describer);
        let provider = Arc::new(MetricsProvider::new(Arc::clone(&store), registry, engine));
        let ingest = IngestHandler::new(Arc::clone(&store));

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                ingest,
                draining: AtomicBool::new(false),
            }),
            store,
            provider,
        }
    }

    pub fn cfg(&self) -> &AdapterConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<MetricStore> {
        Arc::clone(&self.store)
    }

    pub fn ingest(&self) -> &IngestHandler {
        &self.inner.ingest
    }

    pub fn provider(&self) -> Arc<MetricsProvider> {
        Arc::clone(&self.provider)
    }

    /// Mark draining state (readiness turns 503).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
