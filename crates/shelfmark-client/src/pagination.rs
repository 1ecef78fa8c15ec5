//! Cursor-following aggregation of paginated listings.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};
use crate::model::ListPage;
use crate::transport::Transport;

/// Query key carrying the page cursor.
pub const CURSOR_PARAM: &str = "pageCursor";

/// Fetches every page of a listing and concatenates the results.
///
/// `base` must not carry a cursor. Pages are requested one after another,
/// following `nextPageCursor` until it is absent or empty; results keep
/// server order within and across pages. There is no page cap: a service
/// that keeps returning cursors keeps this running.
///
/// # Errors
///
/// The first failed page request aborts the aggregation.
pub async fn fetch_all_pages<T, R>(
    executor: &RequestExecutor<T>,
    base: &ApiRequest,
) -> Result<Vec<R>>
where
    T: Transport + Sync,
    R: DeserializeOwned,
{
    let mut results = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = match &cursor {
            Some(c) => base.clone().query(CURSOR_PARAM, c.clone()),
            None => base.clone(),
        };

        let page: ListPage<R> = executor.fetch(&request).await?;
        pages += 1;
        cursor = page.next_cursor().map(ToString::to_string);
        results.extend(page.results);

        debug!(
            path = %base.path,
            pages,
            fetched = results.len(),
            more = cursor.is_some(),
            "aggregated page"
        );

        if cursor.is_none() {
            return Ok(results);
        }
    }
}
