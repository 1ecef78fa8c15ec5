//! HTTP transport seam.
//!
//! The executor speaks to the network only through [`Transport`], so the
//! retry and pagination logic can run against a scripted transport in tests.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::RETRY_AFTER;

use crate::error::TransportError;

/// HTTP method used by the document service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response as seen by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// Raw `Retry-After` header value.
    pub retry_after: Option<String>,
    /// Body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with the canonical reason phrase for `status`.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            status_text,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Sets the `Retry-After` header.
    #[must_use]
    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// `Retry-After` in whole seconds, if present and numeric.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after.as_deref()?.trim().parse().ok()
    }
}

/// Sends requests over the network.
pub trait Transport {
    /// Performs one HTTP exchange.
    ///
    /// Any status code is a successful exchange; only connection-level
    /// problems are errors.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http_client
            .request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body).map_err(|e| {
                TransportError::new("failed to encode request body").with_source(e)
            })?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            retry_after,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_reason_phrase() {
        let response = HttpResponse::new(429, "");
        assert_eq!(response.status_text, "Too Many Requests");
        assert!(!response.is_success());
        assert!(HttpResponse::new(204, "").is_success());
    }

    #[test]
    fn test_retry_after_parsing() {
        let response = HttpResponse::new(429, "").with_retry_after(" 7 ");
        assert_eq!(response.retry_after_secs(), Some(7));

        let response = HttpResponse::new(429, "").with_retry_after("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(response.retry_after_secs(), None);
        assert_eq!(HttpResponse::new(429, "").retry_after_secs(), None);
    }

    #[test]
    fn test_request_header_lookup() {
        let request = HttpRequest {
            method: Method::Get,
            url: "https://example.test/list/".into(),
            headers: vec![("Authorization".into(), "Token abc".into())],
            body: None,
        };
        assert_eq!(request.header("authorization"), Some("Token abc"));
        assert_eq!(request.header("content-type"), None);
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }
}
