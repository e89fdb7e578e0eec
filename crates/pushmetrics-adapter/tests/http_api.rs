#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use pushmetrics_adapter::app_state::AppState;
use pushmetrics_adapter::router::build_router;

fn app() -> (AppState, Router) {
    let state = AppState::new(common::config()).unwrap();
    let router = build_router(state.clone());
    (state, router)
}

async fn call(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String, Option<String>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let ctype = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap(), ctype)
}

#[tokio::test]
async fn push_then_dump_scenario() {
    let (_, router) = app();

    let (status, body, _) = call(
        &router,
        Method::POST,
        "/custom-metrics",
        r#"{"namespace":"default","name":"web-1","metrics":{"requests_per_second":42}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body, ctype) = call(&router, Method::GET, "/custom-metrics", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("application/json"));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let entry = &json["requests_per_second"]["default/web-1"];
    assert_eq!(entry["value"], "42");
    let time = entry["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "time={time}");
    assert!(time.ends_with('Z'));
}

#[tokio::test]
async fn malformed_push_is_400_and_writes_nothing() {
    let (state, router) = app();

    let (status, body, _) = call(
        &router,
        Method::POST,
        "/custom-metrics",
        r#"{"namespace":"default","name":"web-1","metrics":{"a":1,"b":2.5}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.is_empty());
    assert!(state.store().is_empty());

    let (_, dump, _) = call(&router, Method::GET, "/custom-metrics", "").await;
    assert_eq!(dump, "{}");
}

#[tokio::test]
async fn other_methods_are_404() {
    let (_, router) = app();
    for m in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD, Method::OPTIONS] {
        let (status, _, _) = call(&router, m.clone(), "/custom-metrics", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND, "method={m}");
    }
}

#[tokio::test]
async fn catalog_lists_metrics_pushed_after_startup() {
    let (_, router) = app();

    let (_, body, _) = call(&router, Method::GET, "/apis/custom.metrics.k8s.io/v1beta2", "").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["resources"].as_array().unwrap().len(), 0);

    call(
        &router,
        Method::POST,
        "/custom-metrics",
        r#"{"namespace":"default","name":"a","metrics":{"queue_depth":3}}"#,
    )
    .await;

    let (_, body, _) = call(&router, Method::GET, "/apis/custom.metrics.k8s.io/v1beta2", "").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["resources"][0]["name"], "pods/queue_depth");
    assert_eq!(json["resources"][0]["namespaced"], true);
}

#[tokio::test]
async fn read_api_single_and_selector() {
    let (_, router) = app();
    for (name, v) in [("a", 1), ("c", 3)] {
        let body = format!(r#"{{"namespace":"default","name":"{name}","metrics":{{"rps":{v}}}}}"#);
        let (status, _, _) = call(&router, Method::POST, "/custom-metrics", &body).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body, _) = call(
        &router,
        Method::GET,
        "/apis/custom.metrics.k8s.io/v1beta2/namespaces/default/pods/a/rps",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["kind"], "MetricValueList");
    assert_eq!(json["items"][0]["value"], "1");
    assert_eq!(json["items"][0]["describedObject"]["kind"], "Pod");
    assert!(json["items"][0]["metric"].get("selector").is_none());

    let (status, body, _) = call(
        &router,
        Method::GET,
        "/apis/custom.metrics.k8s.io/v1beta2/namespaces/default/pods/*/rps?labelSelector=app%3Dweb",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let names: Vec<_> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["describedObject"]["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["a", "c"]);
}

#[tokio::test]
async fn read_api_error_mapping() {
    let (_, router) = app();

    let (status, body, _) = call(
        &router,
        Method::GET,
        "/apis/custom.metrics.k8s.io/v1beta2/namespaces/default/pods/a/missing",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], "METRIC_NOT_FOUND");

    let (status, body, _) = call(
        &router,
        Method::GET,
        "/apis/custom.metrics.k8s.io/v1beta2/namespaces/default/pods/*/rps?labelSelector=app%20in%20web",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], "INVALID_SELECTOR");
}

#[tokio::test]
async fn external_metrics_are_empty() {
    let (_, router) = app();
    let (status, body, _) = call(
        &router,
        Method::GET,
        "/apis/external.metrics.k8s.io/v1beta1/namespaces/default/queue_length",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["kind"], "ExternalMetricValueList");
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn readiness_follows_draining() {
    let (state, router) = app();
    let (status, _, _) = call(&router, Method::GET, "/readyz", "").await;
    assert_eq!(status, StatusCode::OK);

    state.set_draining();
    let (status, body, _) = call(&router, Method::GET, "/readyz", "").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "draining");
}
