//! Single-call document and tag operations.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::executor::{ApiRequest, RequestExecutor};
use crate::model::{CreateDocumentParams, Document, Tag, UpdateDocumentParams};
use crate::pagination::fetch_all_pages;
use crate::transport::Transport;

/// Save endpoint path.
pub const SAVE_PATH: &str = "/save/";

/// Tag listing path.
pub const TAGS_PATH: &str = "/tags/";

/// Detail reported for a 204 from the auth endpoint.
pub const TOKEN_VALID: &str = "Token is valid";

#[derive(Debug, Deserialize)]
struct AuthDetail {
    #[serde(default)]
    detail: String,
}

/// Saves a new document.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if the URL is empty; otherwise any request error.
pub async fn create_document<T>(
    executor: &RequestExecutor<T>,
    params: &CreateDocumentParams,
) -> Result<Document>
where
    T: Transport + Sync,
{
    if params.url.trim().is_empty() {
        return Err(Error::InvalidArgument("url must not be empty".into()));
    }
    let request = ApiRequest::post(SAVE_PATH).json(serde_json::to_value(params)?);
    executor.fetch(&request).await
}

/// Applies a partial update.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a malformed id or an empty update;
/// otherwise any request error.
pub async fn update_document<T>(
    executor: &RequestExecutor<T>,
    id: &str,
    params: &UpdateDocumentParams,
) -> Result<Document>
where
    T: Transport + Sync,
{
    check_id(id)?;
    if params.is_empty() {
        return Err(Error::InvalidArgument("update has no fields set".into()));
    }
    let request = ApiRequest::patch(format!("/update/{id}/")).json(serde_json::to_value(params)?);
    executor.fetch(&request).await
}

/// Deletes a document.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a malformed id; otherwise any request error.
pub async fn delete_document<T>(executor: &RequestExecutor<T>, id: &str) -> Result<()>
where
    T: Transport + Sync,
{
    check_id(id)?;
    executor
        .execute_raw(&ApiRequest::delete(format!("/delete/{id}/")))
        .await?;
    Ok(())
}

/// Lists every tag, following pagination.
///
/// # Errors
///
/// Any request error.
pub async fn list_tags<T>(executor: &RequestExecutor<T>) -> Result<Vec<Tag>>
where
    T: Transport + Sync,
{
    fetch_all_pages(executor, &ApiRequest::get(TAGS_PATH)).await
}

/// Checks the configured token against the auth endpoint.
///
/// # Errors
///
/// [`Error::Api`] with status 401 for a rejected token; otherwise any
/// request error.
pub async fn validate_auth<T>(executor: &RequestExecutor<T>) -> Result<String>
where
    T: Transport + Sync,
{
    let request = ApiRequest::get(executor.config().auth_url.clone());
    let detail: Option<AuthDetail> = executor.execute(&request).await?;
    Ok(detail
        .map(|d| d.detail)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| TOKEN_VALID.to_string()))
}

fn check_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(Error::InvalidArgument(format!("invalid document id {id:?}")));
    }
    Ok(())
}
