//! Document listing.
//!
//! [`list_documents`] layers three policies over the plain list endpoint,
//! applied in this order:
//!
//! 1. the full-content count guard ([`ContentGuard`]),
//! 2. client-side `addedAfter` filtering ([`filter`]),
//! 3. content hydration ([`hydrate`]).

pub mod filter;
pub mod guard;
pub mod hydrate;

pub use guard::{ContentGuard, FULL_CONTENT_MAX, FULL_CONTENT_PAGE};
pub use hydrate::ContentSource;

use shelfmark_text::TextConverter;
use tracing::debug;

use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};
use crate::model::{Document, ListDocumentsParams, ListPage};
use crate::pagination::fetch_all_pages;
use crate::response::ApiResponse;
use crate::transport::Transport;

/// List endpoint path.
pub const LIST_PATH: &str = "/list/";

/// Lists documents.
///
/// Without `added_after`, this is one page request. With it, the filter is
/// applied locally: if the caller gave no cursor or limit, every page is
/// fetched and filtered; otherwise only the requested page is filtered and
/// its `count` is reduced to what survived.
///
/// `html_content` is kept only if requested; `content` is filled only if
/// full content was requested.
///
/// # Errors
///
/// Any request failure is returned unchanged. Hydration failures are not
/// errors.
pub async fn list_documents<T, C>(
    executor: &RequestExecutor<T>,
    converter: &C,
    params: &ListDocumentsParams,
) -> Result<ApiResponse<ListPage<Document>>>
where
    T: Transport + Sync,
    C: TextConverter + Sync,
{
    let mut messages = Vec::new();
    let mut effective = params.clone();
    let mut content_cap = None;

    if params.with_full_content {
        let total = count_matches(executor, params).await?;
        let guard = ContentGuard::evaluate(total);
        debug!(total, ?guard, "full-content count guard");

        if let Some(cap) = guard.limit() {
            let cap = effective.limit.map_or(cap, |limit| limit.min(cap));
            effective.limit = Some(cap);
            content_cap = usize::try_from(cap).ok();
            messages.extend(guard.message_for(u64::from(cap), params.added_after.is_some()));
        }
    }

    let mut page = match params.added_after {
        Some(after) if !params.is_paginated() => {
            let base = ApiRequest::get(LIST_PATH).query_pairs(params.to_query());
            let all: Vec<Document> = fetch_all_pages(executor, &base).await?;
            let scanned = all.len();
            let mut kept = filter::saved_after(all, after);
            messages.push(filter::full_scan_notice(after, scanned, kept.len()));

            let count = kept.len() as u64;
            if let Some(cap) = content_cap {
                kept.truncate(cap);
            }
            ListPage {
                count,
                next_page_cursor: None,
                results: kept,
            }
        }
        Some(after) => {
            let mut page = fetch_page(executor, &effective).await?;
            let scanned = page.results.len();
            page.results = filter::saved_after(page.results, after);
            page.count = page.results.len() as u64;
            messages.push(filter::page_notice(after, scanned, page.results.len()));
            page
        }
        None => fetch_page(executor, &effective).await?,
    };

    if params.with_full_content {
        page.results = hydrate::hydrate_all(page.results, converter).await;
    } else {
        for doc in &mut page.results {
            doc.content = None;
        }
    }
    if !params.with_html_content {
        for doc in &mut page.results {
            doc.html_content = None;
        }
    }

    Ok(ApiResponse::with_messages(page, messages))
}

async fn fetch_page<T>(
    executor: &RequestExecutor<T>,
    params: &ListDocumentsParams,
) -> Result<ListPage<Document>>
where
    T: Transport + Sync,
{
    let request = ApiRequest::get(LIST_PATH).query_pairs(params.to_query());
    executor.fetch(&request).await
}

async fn count_matches<T>(executor: &RequestExecutor<T>, params: &ListDocumentsParams) -> Result<u64>
where
    T: Transport + Sync,
{
    let request = ApiRequest::get(LIST_PATH)
        .query_pairs(params.metadata_only().to_query())
        .query("limit", "1");
    let counted: ListPage<Document> = executor.fetch(&request).await?;
    Ok(counted.count)
}
