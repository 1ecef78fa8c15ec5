//! Topic search over the whole library.

use crate::documents::LIST_PATH;
use crate::error::{Error, Result};
use crate::executor::{ApiRequest, RequestExecutor};
use crate::model::Document;
use crate::pagination::fetch_all_pages;
use crate::response::{ApiMessage, ApiResponse};
use crate::transport::Transport;

/// Returns every document mentioning any of `terms`.
///
/// The service has no full-text search, so the whole library is aggregated
/// and matched locally, case-insensitively, against title, author, summary,
/// notes, site name and tag names. Results keep server order.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if no non-blank term is given; otherwise any
/// request error.
pub async fn search_documents_by_topic<T>(
    executor: &RequestExecutor<T>,
    terms: &[String],
) -> Result<ApiResponse<Vec<Document>>>
where
    T: Transport + Sync,
{
    let needles = normalize_terms(terms);
    if needles.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one search term is required".into(),
        ));
    }

    let all: Vec<Document> = fetch_all_pages(executor, &ApiRequest::get(LIST_PATH)).await?;
    let scanned = all.len();
    let matches: Vec<Document> = all
        .into_iter()
        .filter(|doc| matches_any(doc, &needles))
        .map(|mut doc| {
            doc.html_content = None;
            doc.content = None;
            doc
        })
        .collect();

    let message = ApiMessage::info(format!(
        "Matched {} of {scanned} documents for: {}",
        matches.len(),
        needles.join(", ")
    ));
    Ok(ApiResponse::new(matches).with_message(message))
}

fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// True if any needle occurs in a searchable field of `doc`.
///
/// Needles must already be lowercase.
#[must_use]
pub fn matches_any(doc: &Document, needles: &[String]) -> bool {
    let fields = [
        doc.title.as_deref(),
        doc.author.as_deref(),
        doc.summary.as_deref(),
        doc.notes.as_deref(),
        doc.site_name.as_deref(),
    ];
    let haystacks: Vec<String> = fields
        .into_iter()
        .flatten()
        .chain(doc.tags.names())
        .map(str::to_lowercase)
        .collect();

    needles
        .iter()
        .any(|needle| haystacks.iter().any(|h| h.contains(needle.as_str())))
}
