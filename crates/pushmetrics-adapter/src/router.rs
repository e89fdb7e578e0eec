//! Axum router wiring.
//!
//! - push/dump endpoint at `adapter.push_path` (default `/custom-metrics`)
//! - custom/external metrics read routes
//! - `/healthz`, `/readyz`

use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let push_path = state.cfg().adapter.push_path.clone();
    let max_body_bytes = state.cfg().adapter.max_body_bytes;

    Router::new()
        .route(
            &push_path,
            get(transport::push::dump)
                .post(transport::push::push)
                .head(transport::push::not_found)
                .fallback(transport::push::not_found),
        )
        .route("/apis/custom.metrics.k8s.io/v1beta2", get(transport::api::list_metrics))
        .route(
            "/apis/custom.metrics.k8s.io/v1beta2/namespaces/:namespace/:resource/:name/:metric",
            get(transport::api::get_namespaced_metric),
        )
        .route(
            "/apis/external.metrics.k8s.io/v1beta1/namespaces/:namespace/:metric",
            get(transport::api::get_external_metric),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
