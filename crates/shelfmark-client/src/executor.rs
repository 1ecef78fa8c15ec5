//! Request execution with rate-limit retries.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

const NO_CONTENT: u16 = 204;
const TOO_MANY_REQUESTS: u16 = 429;

/// A logical API call, before URL resolution and auth.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Method.
    pub method: Method,
    /// Path relative to the base URL, or an absolute `http(s)://` URL.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PATCH` request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends all query parameters.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Issues authenticated requests and applies the retry policy.
///
/// - 2xx: the body is returned (204 yields no body and is never decoded).
/// - 429: waits `max(Retry-After, base * 2^attempt)`, capped at the policy's
///   `max_delay`, and tries again until `max_retries` is spent.
/// - anything else: [`Error::Api`] immediately.
#[derive(Debug)]
pub struct RequestExecutor<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport + Sync> RequestExecutor<T> {
    /// Creates an executor.
    #[must_use]
    pub const fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes a request and decodes the body.
    ///
    /// Returns `None` for 204 No Content.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`], [`Error::RateLimitExceeded`], [`Error::Api`], or
    /// [`Error::Json`] if the body does not decode as `R`.
    pub async fn execute<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Option<R>> {
        match self.execute_raw(request).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    /// Executes a request that must return a body.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus [`Error::EmptyResponse`] on 204.
    pub async fn fetch<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        self.execute(request)
            .await?
            .ok_or(Error::EmptyResponse(NO_CONTENT))
    }

    /// Executes a request and returns the raw body text.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`], [`Error::RateLimitExceeded`] or [`Error::Api`].
    pub async fn execute_raw(&self, request: &ApiRequest) -> Result<Option<String>> {
        let http_request = self.build(request)?;
        let retry = self.config.retry;
        let mut attempt: u32 = 0;
        let mut last_retry_after = None;

        loop {
            debug!(
                method = http_request.method.as_str(),
                url = %http_request.url,
                attempt,
                "sending request"
            );
            let response = self.transport.send(http_request.clone()).await?;

            if response.status == TOO_MANY_REQUESTS {
                last_retry_after = response.retry_after_secs().or(last_retry_after);
                if attempt >= retry.max_retries {
                    return Err(Error::RateLimitExceeded {
                        retry_after: last_retry_after,
                        attempts: attempt + 1,
                    });
                }

                let delay = retry.delay_for(attempt, response.retry_after_secs());
                warn!(
                    url = %http_request.url,
                    attempt = attempt + 1,
                    max_retries = retry.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Self::interpret(response);
        }
    }

    fn interpret(response: HttpResponse) -> Result<Option<String>> {
        if !response.is_success() {
            return Err(Error::Api {
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            });
        }
        if response.status == NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.body))
    }

    fn build(&self, request: &ApiRequest) -> Result<HttpRequest> {
        Ok(HttpRequest {
            method: request.method,
            url: self.resolve_url(request)?,
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Token {}", self.config.token()),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: request.body.clone(),
        })
    }

    fn resolve_url(&self, request: &ApiRequest) -> Result<String> {
        let path = request.path.as_str();
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)?
        } else {
            let sep = if path.starts_with('/') { "" } else { "/" };
            Url::parse(&format!("{}{sep}{path}", self.config.base_url))?
        };

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url.into())
    }
}
