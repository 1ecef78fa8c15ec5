//! High-level client.

use shelfmark_text::{HttpTextConverter, TextConverter};

use crate::api;
use crate::bulk::{BULK_CONCURRENCY, BulkReport, run_batched};
use crate::config::ClientConfig;
use crate::documents;
use crate::error::{Result, TransportError};
use crate::executor::RequestExecutor;
use crate::model::{
    CreateDocumentParams, Document, ListDocumentsParams, ListPage, Tag, UpdateDocumentParams,
};
use crate::response::{ApiMessage, ApiResponse};
use crate::search;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the document service.
///
/// Every operation returns an [`ApiResponse`]; advisory conditions show up
/// as messages on it, fatal ones as `Err`.
#[derive(Debug)]
pub struct ReaderClient<T = ReqwestTransport, C = HttpTextConverter> {
    executor: RequestExecutor<T>,
    converter: C,
}

impl ReaderClient {
    /// Creates a client with the reqwest transport and HTTP text converter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if an HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        let converter = HttpTextConverter::new().map_err(|e| {
            TransportError::new("failed to build the text converter").with_source(e)
        })?;
        Ok(Self::with_parts(transport, converter, config))
    }

    /// Creates a client from `SHELFMARK_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T, C> ReaderClient<T, C>
where
    T: Transport + Sync,
    C: TextConverter + Sync,
{
    /// Creates a client from its collaborators.
    #[must_use]
    pub const fn with_parts(transport: T, converter: C, config: ClientConfig) -> Self {
        Self {
            executor: RequestExecutor::new(transport, config),
            converter,
        }
    }

    /// Returns the request executor.
    #[must_use]
    pub const fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Returns the URL-to-text converter.
    #[must_use]
    pub const fn converter(&self) -> &C {
        &self.converter
    }

    /// Saves a new document.
    ///
    /// # Errors
    ///
    /// See [`api::create_document`].
    pub async fn create_document(
        &self,
        params: &CreateDocumentParams,
    ) -> Result<ApiResponse<Document>> {
        api::create_document(&self.executor, params)
            .await
            .map(ApiResponse::new)
    }

    /// Lists documents with count guard, local filtering and hydration.
    ///
    /// # Errors
    ///
    /// See [`documents::list_documents`].
    pub async fn list_documents(
        &self,
        params: &ListDocumentsParams,
    ) -> Result<ApiResponse<ListPage<Document>>> {
        documents::list_documents(&self.executor, &self.converter, params).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// See [`api::update_document`].
    pub async fn update_document(
        &self,
        id: &str,
        params: &UpdateDocumentParams,
    ) -> Result<ApiResponse<Document>> {
        api::update_document(&self.executor, id, params)
            .await
            .map(ApiResponse::new)
    }

    /// Deletes one document.
    ///
    /// # Errors
    ///
    /// See [`api::delete_document`].
    pub async fn delete_document(&self, id: &str) -> Result<ApiResponse<()>> {
        api::delete_document(&self.executor, id)
            .await
            .map(ApiResponse::new)
    }

    /// Deletes many documents, five at a time.
    ///
    /// Never fails as a whole: per-id outcomes are in the report, and a
    /// summary message is attached (error kind if anything failed).
    pub async fn delete_documents(&self, ids: &[String]) -> ApiResponse<BulkReport> {
        let report = run_batched(ids, BULK_CONCURRENCY, |id| {
            api::delete_document(&self.executor, id)
        })
        .await;

        let message = if report.failed() == 0 {
            ApiMessage::info(format!("Deleted {}", report.summary()))
        } else {
            ApiMessage::error(format!("Deleted {}", report.summary()))
        };
        ApiResponse::new(report).with_message(message)
    }

    /// Lists every tag.
    ///
    /// # Errors
    ///
    /// See [`api::list_tags`].
    pub async fn list_tags(&self) -> Result<ApiResponse<Vec<Tag>>> {
        api::list_tags(&self.executor).await.map(ApiResponse::new)
    }

    /// Searches the whole library for documents about any of `terms`.
    ///
    /// # Errors
    ///
    /// See [`search::search_documents_by_topic`].
    pub async fn search_documents_by_topic(
        &self,
        terms: &[String],
    ) -> Result<ApiResponse<Vec<Document>>> {
        search::search_documents_by_topic(&self.executor, terms).await
    }

    /// Validates the configured token.
    ///
    /// # Errors
    ///
    /// See [`api::validate_auth`].
    pub async fn validate_auth(&self) -> Result<ApiResponse<String>> {
        api::validate_auth(&self.executor).await.map(ApiResponse::new)
    }
}
