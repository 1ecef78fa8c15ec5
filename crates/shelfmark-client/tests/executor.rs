//! Request executor behaviour: retries, status handling, auth headers.

mod common;

use std::time::Duration;

use common::{MockTransport, config, ok, rate_limited, status};
use serde_json::{Value, json};
use shelfmark_client::{ApiRequest, Error, RequestExecutor, RetryConfig, TransportError};
use tokio::time::Instant;

fn executor(transport: MockTransport, retry: RetryConfig) -> RequestExecutor<MockTransport> {
    RequestExecutor::new(transport, config(retry))
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhausts_after_max_retries() {
    let transport = MockTransport::routed(|_| Ok(rate_limited(Some("1"))));
    let retry = RetryConfig::new(3, Duration::from_millis(100), Duration::from_secs(10));
    let executor = executor(transport, retry);

    let result = executor.execute_raw(&ApiRequest::get("/list/")).await;

    match result {
        Err(Error::RateLimitExceeded {
            retry_after,
            attempts,
        }) => {
            assert_eq!(retry_after, Some(1));
            assert_eq!(attempts, 4);
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
    assert_eq!(executor.transport().request_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_fails_on_first_429() {
    let transport = MockTransport::routed(|_| Ok(rate_limited(None)));
    let executor = executor(transport, RetryConfig::disabled());

    let result = executor.execute_raw(&ApiRequest::get("/list/")).await;

    assert!(matches!(
        result,
        Err(Error::RateLimitExceeded {
            retry_after: None,
            attempts: 1
        })
    ));
    assert_eq!(executor.transport().request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_is_honoured() {
    let transport = MockTransport::scripted(vec![
        rate_limited(Some("5")),
        ok(json!({"count": 0, "results": []})),
    ]);
    let retry = RetryConfig::new(3, Duration::from_millis(100), Duration::from_secs(10));
    let executor = executor(transport, retry);

    let start = Instant::now();
    let body: Value = executor.fetch(&ApiRequest::get("/list/")).await.unwrap();
    let waited = start.elapsed();

    assert_eq!(body["count"], 0);
    assert!(waited >= Duration::from_secs(5), "waited {waited:?}");
    assert!(waited <= Duration::from_secs(10), "waited {waited:?}");
    assert_eq!(executor.transport().request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_wait_is_capped_at_max_delay() {
    let transport = MockTransport::scripted(vec![
        rate_limited(Some("3600")),
        ok(json!({"count": 0, "results": []})),
    ]);
    let retry = RetryConfig::new(1, Duration::from_millis(100), Duration::from_secs(2));
    let executor = executor(transport, retry);

    let start = Instant::now();
    let _: Value = executor.fetch(&ApiRequest::get("/list/")).await.unwrap();

    let waited = start.elapsed();
    assert!(waited >= Duration::from_secs(2), "waited {waited:?}");
    assert!(waited < Duration::from_millis(2010), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_exponential_backoff_without_hint() {
    let transport = MockTransport::scripted(vec![
        rate_limited(None),
        rate_limited(None),
        rate_limited(None),
        ok(json!({"ok": true})),
    ]);
    let retry = RetryConfig::new(3, Duration::from_millis(100), Duration::from_secs(10));
    let executor = executor(transport, retry);

    let start = Instant::now();
    let _: Value = executor.fetch(&ApiRequest::get("/list/")).await.unwrap();

    // 100ms + 200ms + 400ms
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(700), "waited {waited:?}");
    assert!(waited < Duration::from_millis(710), "waited {waited:?}");
}

#[tokio::test]
async fn test_no_content_skips_decoding() {
    let transport = MockTransport::scripted(vec![status(204, "this is not json")]);
    let executor = executor(transport, common::fast_retry());

    let result: Option<Value> = executor
        .execute(&ApiRequest::delete("/delete/abc/"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_fetch_rejects_no_content() {
    let transport = MockTransport::scripted(vec![status(204, "")]);
    let executor = executor(transport, common::fast_retry());

    let result: shelfmark_client::Result<Value> = executor.fetch(&ApiRequest::get("/list/")).await;
    assert!(matches!(result, Err(Error::EmptyResponse(204))));
}

#[tokio::test]
async fn test_api_error_is_not_retried() {
    let transport = MockTransport::routed(|_| Ok(status(500, "boom")));
    let executor = executor(transport, common::fast_retry());

    let result = executor.execute_raw(&ApiRequest::get("/list/")).await;

    match result {
        Err(Error::Api {
            status,
            status_text,
            body,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(executor.transport().request_count(), 1);
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let transport = MockTransport::routed(|_| Err(TransportError::new("connection refused")));
    let executor = executor(transport, common::fast_retry());

    let result = executor.execute_raw(&ApiRequest::get("/list/")).await;

    assert!(matches!(result, Err(Error::Transport(_))));
    assert_eq!(executor.transport().request_count(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let transport = MockTransport::scripted(vec![status(200, "<html>")]);
    let executor = executor(transport, common::fast_retry());

    let result: shelfmark_client::Result<Value> = executor.fetch(&ApiRequest::get("/list/")).await;
    assert!(matches!(result, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_requests_carry_token_and_json_headers() {
    let transport = MockTransport::scripted(vec![ok(json!({"id": "1"}))]);
    let executor = executor(transport, common::fast_retry());

    let _: Value = executor
        .fetch(&ApiRequest::post("/save/").json(json!({"url": "https://x.test"})))
        .await
        .unwrap();

    let sent = &executor.transport().requests()[0];
    assert_eq!(sent.url, "https://api.test/v3/save/");
    assert_eq!(sent.header("Authorization"), Some("Token test-token"));
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert_eq!(sent.body, Some(json!({"url": "https://x.test"})));
}
