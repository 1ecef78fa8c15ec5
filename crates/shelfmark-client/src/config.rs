//! Client configuration types.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://readwise.io/api/v3";

/// Default token validation endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://readwise.io/api/v2/auth/";

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "SHELFMARK_TOKEN";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "SHELFMARK_BASE_URL";

/// Environment variable overriding the retry budget.
pub const MAX_RETRIES_ENV: &str = "SHELFMARK_MAX_RETRIES";

/// Retry policy for rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff for the first retry; doubled on every further attempt.
    pub base_delay: Duration,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl RetryConfig {
    /// Creates a retry policy.
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO)
    }

    /// Exponential backoff for `attempt` (zero-based): `base * 2^attempt`,
    /// capped at `max_delay`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Wait before retrying `attempt` (zero-based).
    ///
    /// The larger of the server's `Retry-After` (seconds) and [`backoff`],
    /// never above `max_delay`.
    ///
    /// [`backoff`]: Self::backoff
    #[must_use]
    pub fn delay_for(&self, attempt: u32, retry_after_secs: Option<u64>) -> Duration {
        let server = retry_after_secs.map_or(Duration::ZERO, Duration::from_secs);
        server.max(self.backoff(attempt)).min(self.max_delay)
    }
}

/// Connection settings for the document service.
#[derive(Clone)]
pub struct ClientConfig {
    /// Access token sent as `Authorization: Token <token>`.
    token: String,
    /// API base URL; relative request paths are appended to it.
    pub base_url: String,
    /// Token validation endpoint.
    pub auth_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Rate-limit retry policy.
    pub retry: RetryConfig,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with default endpoints.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::builder(token).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(token)
    }

    /// Reads the configuration from `SHELFMARK_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the token is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::InvalidConfig(format!("{TOKEN_ENV} is not set")))?;

        let mut builder = ClientConfigBuilder::new(token);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = lookup(MAX_RETRIES_ENV) {
            let max_retries = raw.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("{MAX_RETRIES_ENV} must be an integer, got {raw:?}"))
            })?;
            builder = builder.max_retries(max_retries);
        }
        Ok(builder.build())
    }

    /// Returns the access token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    token: String,
    base_url: String,
    auth_url: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl ClientConfigBuilder {
    /// Creates a new builder with the given token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the token validation URL.
    #[must_use]
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the whole retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            token: self.token,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            auth_url: self.auth_url,
            timeout: self.timeout,
            retry: self.retry,
        }
    }
}
