//! End-to-end tests for the revive flow against a mock tracker.

use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::http::StatusCode;

mod common;

fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_revive_without_id_never_reaches_upstream() {
    let (upstream, calls) = common::start_mock_tracker(200, "foo").await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Shot/", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "Upstream must not be called");

    shutdown.trigger();
}

#[tokio::test]
async fn test_revive_permission_rule_is_forbidden() {
    let (upstream, _) = common::start_mock_tracker(
        200,
        r#"{"exception":true,"message":"API delete() CRUD ERROR #4.1: Entity Project 75 can not be deleted by this user. Rule: API Admin -- PermissionRule 315: retire_entity_condition FOR entity_type => Project.  RULE: {\"path\":\"name\", \"relation\":\"is_not\",\"values\":[\"Template Project\"]}","error_code":104}"#,
    )
    .await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    shutdown.trigger();
}

#[tokio::test]
async fn test_revive_generic_exception_is_bad_request() {
    let (upstream, _) = common::start_mock_tracker(
        200,
        r#"{"exception":true,"message":"Some Error message","error_code":104}"#,
    )
    .await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.text().await.unwrap();
    assert!(
        body.contains("Some Error message"),
        "Upstream message must be passed through, got: {body}"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_revive_success() {
    let (upstream, calls) = common::start_mock_tracker(200, r#"{"results": true}"#).await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["results"], serde_json::Value::Bool(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_revive_missing_entity_is_not_found() {
    let (upstream, _) = common::start_mock_tracker(
        200,
        r#"{"exception":true,"message":"API delete() CRUD ERROR #3: Entity of type [Shot] with id=1000000 does not exist.","error_code":104}"#,
    )
    .await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Shot/1000000/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_revive_non_json_upstream_is_bad_gateway() {
    let (upstream, _) = common::start_mock_tracker(200, "foo").await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    shutdown.trigger();
}

#[tokio::test]
async fn test_revive_unreachable_upstream_is_bad_gateway() {
    // Grab an ephemeral port and drop the listener so nothing answers.
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let (gateway, shutdown) = common::spawn_gateway(dead_addr).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .post(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    shutdown.trigger();
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let (upstream, calls) = common::start_mock_tracker(200, r#"{"results": true}"#).await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .get(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (upstream, _) = common::start_mock_tracker(200, r#"{"results": true}"#).await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = test_client();

    // Generated when absent.
    let res = client
        .post(format!("http://{}/Project/75/revive", gateway))
        .send()
        .await
        .expect("Gateway unreachable");
    assert!(res.headers().contains_key("x-request-id"));

    // Preserved when supplied.
    let res = client
        .post(format!("http://{}/Project/75/revive", gateway))
        .header("x-request-id", "it-came-from-the-caller")
        .send()
        .await
        .expect("Gateway unreachable");
    assert_eq!(
        res.headers().get("x-request-id").unwrap(),
        "it-came-from-the-caller"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_healthz() {
    let (upstream, _) = common::start_mock_tracker(200, r#"{"results": true}"#).await;
    let (gateway, shutdown) = common::spawn_gateway(upstream).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = test_client()
        .get(format!("http://{}/healthz", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    shutdown.trigger();
}
