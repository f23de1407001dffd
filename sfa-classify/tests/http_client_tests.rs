//! HTTP client and end-to-end resolution tests against an in-process service

mod helpers;

use axum::http::StatusCode;
use helpers::{multi_xml, single_xml, spawn_service, status_xml};
use sfa_classify::services::classify_client::DEFAULT_USER_AGENT;
use sfa_classify::{
    ClassificationResponse, ClassifyError, ClassifyTransport, HttpClassifyClient, KeyType,
    QueryKey, Resolver, ResponseStatus, RetryPolicy,
};
use std::time::Duration;

fn client(base_url: &str) -> HttpClassifyClient {
    HttpClassifyClient::new(base_url, Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap()
}

fn resolver(base_url: &str) -> Resolver<HttpClassifyClient> {
    Resolver::new(client(base_url), RetryPolicy::new(5, Duration::from_millis(1)))
}

#[tokio::test]
async fn test_request_carries_key_and_summary_flag() {
    let service = spawn_service(|_| (StatusCode::OK, single_xml("PS3551.A80"))).await;

    let response = client(&service.base_url)
        .query(&QueryKey::new(KeyType::Issn, "0000-0001"))
        .await;

    assert_eq!(response, ClassificationResponse::single("PS3551.A80"));

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].get("issn").map(String::as_str), Some("0000-0001"));
    assert_eq!(requests[0].get("summary").map(String::as_str), Some("true"));
    assert_eq!(requests[0].len(), 2);
}

#[tokio::test]
async fn test_key_value_is_url_encoded() {
    let service = spawn_service(|_| (StatusCode::OK, status_xml("2"))).await;

    client(&service.base_url)
        .query(&QueryKey::new(KeyType::StdNbr, "12 34&x=5"))
        .await;

    let requests = service.requests();
    assert_eq!(requests[0].get("stdnbr").map(String::as_str), Some("12 34&x=5"));
    assert!(!requests[0].contains_key("x"));
}

#[tokio::test]
async fn test_http_error_status_is_unusable() {
    let service = spawn_service(|_| (StatusCode::SERVICE_UNAVAILABLE, String::new())).await;
    let client = client(&service.base_url);
    let key = QueryKey::new(KeyType::Issn, "0000-0001");

    assert!(matches!(
        client.fetch(&key).await,
        Err(ClassifyError::HttpStatus(503))
    ));
    assert_eq!(client.query(&key).await.status, ResponseStatus::Unusable);
}

#[tokio::test]
async fn test_malformed_body_is_unusable() {
    let service = spawn_service(|_| (StatusCode::OK, "<classify><response".to_string())).await;
    let client = client(&service.base_url);
    let key = QueryKey::new(KeyType::Issn, "0000-0001");

    assert!(matches!(client.fetch(&key).await, Err(ClassifyError::Parse(_))));
    assert_eq!(client.query(&key).await, ClassificationResponse::unusable());
}

#[tokio::test]
async fn test_scenario_single_match() {
    let service = spawn_service(|params| match params.get("issn").map(String::as_str) {
        Some("0000-0001") => (StatusCode::OK, single_xml("PS3551.A80")),
        _ => (StatusCode::OK, status_xml("102")),
    })
    .await;

    let result = resolver(&service.base_url)
        .resolve(&KeyType::Issn, "0000-0001")
        .await;

    assert_eq!(result.as_deref(), Some("PS3551.A80"));
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn test_scenario_multiple_matches() {
    let service = spawn_service(|params| {
        if params.get("issn").map(String::as_str) == Some("0000-0002") {
            return (StatusCode::OK, multi_xml(&[("12345", "67890"), ("11111", "22222")]));
        }
        match params.get("oclc").map(String::as_str) {
            Some("12345") => (StatusCode::OK, single_xml("QA76.73")),
            Some("67890") => (StatusCode::OK, single_xml("SHOULD-NOT-BE-USED")),
            _ => (StatusCode::OK, status_xml("102")),
        }
    })
    .await;

    let result = resolver(&service.base_url)
        .resolve(&KeyType::Issn, "0000-0002")
        .await;

    assert_eq!(result.as_deref(), Some("QA76.73"));

    let requests = service.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].get("oclc").map(String::as_str), Some("12345"));
    assert!(requests
        .iter()
        .all(|r| r.get("oclc").map(String::as_str) != Some("67890")));
}

#[tokio::test]
async fn test_scenario_persistent_transient_status() {
    let service = spawn_service(|_| (StatusCode::OK, status_xml("1"))).await;

    let result = resolver(&service.base_url)
        .resolve(&KeyType::Issn, "0000-0003")
        .await;

    assert_eq!(result, None);
    assert_eq!(service.requests().len(), 5);
}

#[tokio::test]
async fn test_transient_then_success_over_http() {
    let counter = std::sync::atomic::AtomicUsize::new(0);
    let service = spawn_service(move |_| {
        let n = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if n < 2 {
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        } else {
            (StatusCode::OK, single_xml("BF121.A1"))
        }
    })
    .await;

    let result = resolver(&service.base_url)
        .resolve(&KeyType::Issn, "0000-0004")
        .await;

    assert_eq!(result.as_deref(), Some("BF121.A1"));
    assert_eq!(service.requests().len(), 3);
}

#[tokio::test]
async fn test_truncated_body_is_retried_then_absent() {
    let service = spawn_service(|_| {
        (StatusCode::OK, r#"<classify xmlns="http://classify.oclc.org"><response code="0"/>"#.to_string())
    })
    .await;

    let result = resolver(&service.base_url)
        .resolve(&KeyType::Issn, "0000-0005")
        .await;

    assert_eq!(result, None);
    assert_eq!(service.requests().len(), 5);
}
