//! Shared mocks for the integration tests.
//!
//! [`MockTransport`] answers requests from a script or a routing function
//! and records everything it was sent. [`StubConverter`] stands in for the
//! URL-to-text collaborator.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use shelfmark_client::{
    ClientConfig, HttpRequest, HttpResponse, ReaderClient, RetryConfig, TextConverter, Transport,
    TransportError,
};

pub const BASE_URL: &str = "https://api.test/v3";

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// Transport returning canned responses.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<HttpRequest>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    /// Answers requests with `responses`, in order.
    ///
    /// Panics when the script runs out.
    pub fn scripted(responses: Vec<HttpResponse>) -> Self {
        let queue = Mutex::new(VecDeque::from(responses));
        Self::routed(move |request| {
            Ok(queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request: {}", request.url)))
        })
    }

    /// Answers requests with `handler`.
    pub fn routed(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delays every response, so concurrent requests overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        (self.handler)(&request)
    }
}

/// URL-to-text stand-in: returns `text of <url>` unless the URL is listed
/// as failing.
#[derive(Default)]
pub struct StubConverter {
    failing: Vec<String>,
    calls: Mutex<Vec<(String, Option<String>)>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubConverter {
    pub fn failing_on(urls: &[&str]) -> Self {
        Self {
            failing: urls.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Delays every conversion, so concurrent conversions overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl TextConverter for StubConverter {
    async fn url_to_text(
        &self,
        url: &str,
        category_hint: Option<&str>,
    ) -> shelfmark_text::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), category_hint.map(ToString::to_string)));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.iter().any(|u| u == url) {
            return Err(shelfmark_text::Error::Status(502));
        }
        Ok(format!("text of {url}"))
    }
}

pub fn config(retry: RetryConfig) -> ClientConfig {
    ClientConfig::builder("test-token")
        .base_url(BASE_URL)
        .auth_url("https://auth.test/api/v2/auth/")
        .retry(retry)
        .build()
}

pub fn fast_retry() -> RetryConfig {
    RetryConfig::new(3, Duration::from_millis(100), Duration::from_secs(10))
}

pub fn client(transport: MockTransport) -> ReaderClient<MockTransport, StubConverter> {
    client_with(transport, StubConverter::default())
}

pub fn client_with(
    transport: MockTransport,
    converter: StubConverter,
) -> ReaderClient<MockTransport, StubConverter> {
    ReaderClient::with_parts(transport, converter, config(fast_retry()))
}

pub fn ok(body: Value) -> HttpResponse {
    HttpResponse::new(200, body.to_string())
}

pub fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse::new(code, body)
}

pub fn rate_limited(retry_after: Option<&str>) -> HttpResponse {
    let response = HttpResponse::new(429, "{\"detail\":\"Request was throttled.\"}");
    match retry_after {
        Some(value) => response.with_retry_after(value),
        None => response,
    }
}

pub fn doc(id: &str) -> Value {
    json!({
        "id": id,
        "url": format!("https://read.test/read/{id}"),
        "source_url": format!("https://source.test/{id}"),
        "title": format!("Document {id}"),
        "category": "article",
        "saved_at": "2024-01-01T00:00:00+00:00",
    })
}

pub fn doc_saved(id: &str, saved_at: &str) -> Value {
    let mut value = doc(id);
    value["saved_at"] = json!(saved_at);
    value
}

pub fn page(count: u64, cursor: Option<&str>, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "nextPageCursor": cursor,
        "results": results,
    })
}

/// Query parameter value of a recorded request.
pub fn query_param(request: &HttpRequest, key: &str) -> Option<String> {
    url::Url::parse(&request.url)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
