//! Client-side `addedAfter` filtering.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::Document;
use crate::response::ApiMessage;

/// Keeps documents saved strictly after `after`. Documents without
/// `saved_at` are dropped. Order is preserved.
#[must_use]
pub fn saved_after(documents: Vec<Document>, after: DateTime<Utc>) -> Vec<Document> {
    documents
        .into_iter()
        .filter(|doc| doc.saved_at.is_some_and(|saved| saved > after))
        .collect()
}

/// Disclosure for a filter applied to the complete result set.
#[must_use]
pub fn full_scan_notice(after: DateTime<Utc>, scanned: usize, kept: usize) -> ApiMessage {
    ApiMessage::info(format!(
        "addedAfter is filtered client-side: fetched all {scanned} matching documents first, \
         then kept {kept} saved after {}.",
        after.to_rfc3339_opts(SecondsFormat::Secs, true)
    ))
}

/// Disclosure for a filter applied to a single requested page.
#[must_use]
pub fn page_notice(after: DateTime<Utc>, scanned: usize, kept: usize) -> ApiMessage {
    ApiMessage::info(format!(
        "addedAfter is filtered client-side within the requested page: kept {kept} of \
         {scanned} documents saved after {}.",
        after.to_rfc3339_opts(SecondsFormat::Secs, true)
    ))
}
