//! # shelfmark-client
//!
//! Async client for a read-later document service (Readwise Reader API).
//!
//! ## Features
//!
//! - **Rate-limit resilience**: 429 responses are retried with exponential
//!   backoff, honouring `Retry-After`, within a bounded budget
//! - **Pagination**: cursor-following aggregation when the whole result set
//!   is needed
//! - **Full-content listings**: documents hydrated to plain text, guarded by
//!   a match-count check
//! - **Client-side date filtering**: `addedAfter`, which the service lacks
//! - **Bulk deletes**: five at a time, per-item outcomes
//! - **Uniform envelope**: every operation returns `{data, messages}`
//!
//! ## Quick Start
//!
//! ```ignore
//! use shelfmark_client::{ClientConfig, ListDocumentsParams, ReaderClient};
//!
//! #[tokio::main]
//! async fn main() -> shelfmark_client::Result<()> {
//!     let client = ReaderClient::new(ClientConfig::new("your-token"))?;
//!
//!     let params = ListDocumentsParams {
//!         tag: Some("rust".into()),
//!         with_full_content: true,
//!         ..ListDocumentsParams::default()
//!     };
//!     let response = client.list_documents(&params).await?;
//!     for doc in &response.data.results {
//!         println!("{}: {}", doc.id, doc.title.as_deref().unwrap_or(""));
//!     }
//!     for message in &response.messages {
//!         println!("{:?}: {}", message.kind, message.content);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod bulk;
mod client;
pub mod config;
pub mod documents;
mod error;
pub mod executor;
pub mod model;
pub mod pagination;
pub mod response;
pub mod search;
pub mod transport;

pub use bulk::{BulkItemResult, BulkReport};
pub use client::ReaderClient;
pub use config::{ClientConfig, ClientConfigBuilder, RetryConfig};
pub use error::{Error, Result, TransportError};
pub use executor::{ApiRequest, RequestExecutor};
pub use model::{
    Category, CreateDocumentParams, Document, DocumentTags, ListDocumentsParams, ListPage,
    Location, Tag, UpdateDocumentParams,
};
pub use response::{ApiMessage, ApiResponse, MessageKind};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

pub use shelfmark_text::{HttpTextConverter, TextConverter};
