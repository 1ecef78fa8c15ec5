//! Error types for text conversion.

/// Result type alias for text conversion.
pub type Result<T> = std::result::Result<T, Error>;

/// Text conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-2xx status.
    #[error("source returned status {0}")]
    Status(u16),

    /// No URL was available to fetch.
    #[error("document has no source URL")]
    MissingUrl,

    /// The source served something that is not text or HTML.
    #[error("unsupported content type: {0}")]
    UnsupportedContent(String),
}
