//! URL-to-text conversion.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::{Error, Result};
use crate::markup::markup_to_text;

/// Turns the resource behind a URL into plain text.
///
/// Implementations may perform network I/O and may fail; callers decide how
/// a failure affects the surrounding operation.
pub trait TextConverter {
    /// Fetches `url` and returns its readable text.
    ///
    /// `category_hint` is the document category as reported by the service
    /// (`article`, `pdf`, `email`, ...), if any.
    fn url_to_text(
        &self,
        url: &str,
        category_hint: Option<&str>,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// [`TextConverter`] that downloads the page with reqwest.
///
/// HTML is converted with [`markup_to_text`]; plain text and Markdown are
/// passed through. Anything else is rejected.
#[derive(Debug, Clone)]
pub struct HttpTextConverter {
    http_client: Client,
}

impl HttpTextConverter {
    /// Creates a converter with a 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http_client })
    }

    /// Creates a converter on top of an existing client.
    #[must_use]
    pub const fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

impl TextConverter for HttpTextConverter {
    async fn url_to_text(&self, url: &str, category_hint: Option<&str>) -> Result<String> {
        if url.trim().is_empty() {
            return Err(Error::MissingUrl);
        }

        debug!(url, category = category_hint.unwrap_or(""), "fetching source");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        match ContentKind::from_mime(&content_type) {
            ContentKind::Html => Ok(markup_to_text(&response.text().await?)),
            ContentKind::Text => Ok(response.text().await?.trim().to_string()),
            ContentKind::Other => Err(Error::UnsupportedContent(content_type)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Html,
    Text,
    Other,
}

impl ContentKind {
    fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence {
            "text/html" | "application/xhtml+xml" => Self::Html,
            "text/plain" | "text/markdown" | "text/x-markdown" => Self::Text,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_from_mime() {
        assert_eq!(
            ContentKind::from_mime("text/html; charset=utf-8"),
            ContentKind::Html
        );
        assert_eq!(ContentKind::from_mime("text/plain"), ContentKind::Text);
        assert_eq!(ContentKind::from_mime("text/markdown"), ContentKind::Text);
        assert_eq!(
            ContentKind::from_mime("application/pdf"),
            ContentKind::Other
        );
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected() {
        let converter = HttpTextConverter::new().unwrap();
        let result = converter.url_to_text("  ", None).await;
        assert!(matches!(result, Err(Error::MissingUrl)));
    }
}
