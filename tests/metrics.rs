// tests/metrics.rs
//
// Installs the global Prometheus recorder, so keep a single test in this binary.
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use email_classifier::api::{self, AppState};
use email_classifier::metrics::Metrics;
use email_classifier::EmailClassifier;

#[tokio::test]
async fn metrics_endpoint_contains_expected_series() {
    let metrics = Metrics::init(false).expect("install recorder");
    let classifier = Arc::new(EmailClassifier::rule_based());
    let app = api::router(AppState::new(classifier.clone())).merge(metrics.router());

    classifier.classify("please help with my account").await.unwrap();
    let _ = classifier.classify("   ").await;

    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "email_classifications_total",
        "category=\"support\"",
        "method=\"rule-based\"",
        "email_classify_empty_total",
        "email_classify_ms",
        "sentiment_adapter_enabled 0",
    ] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}
