//! Full-content hydration.

use futures::future::join_all;
use shelfmark_text::{TextConverter, markup_to_text};
use tracing::{debug, warn};

use crate::model::{Category, Document};

/// Where a document's text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource<'a> {
    /// Convert the page behind this URL.
    Url(&'a str),
    /// Extract text from inline markup.
    Markup(&'a str),
    /// Nothing to hydrate from.
    Unavailable,
}

impl<'a> ContentSource<'a> {
    /// Chooses the source for `doc`.
    ///
    /// Articles, PDFs and uncategorised documents are converted from their
    /// URL even when markup is present, since inline markup for those is
    /// often a reader-view excerpt. Other categories use inline markup when
    /// there is some. Without markup the URL is always used.
    #[must_use]
    pub fn for_document(doc: &'a Document) -> Self {
        let url = doc.content_url();
        match (doc.inline_markup(), url) {
            (Some(markup), url) => {
                let prefers_url = matches!(
                    doc.category,
                    None | Some(Category::Article | Category::Pdf)
                );
                match url {
                    Some(url) if prefers_url => Self::Url(url),
                    _ => Self::Markup(markup),
                }
            }
            (None, Some(url)) => Self::Url(url),
            (None, None) => Self::Unavailable,
        }
    }
}

/// Fills `content` on every document, concurrently.
///
/// Each document is independent: when URL conversion fails the document
/// falls back to its inline markup, or is left with empty content if it has
/// none, and the others are unaffected. Output order matches input order.
pub async fn hydrate_all<C>(documents: Vec<Document>, converter: &C) -> Vec<Document>
where
    C: TextConverter + Sync,
{
    join_all(
        documents
            .into_iter()
            .map(|doc| hydrate_one(doc, converter)),
    )
    .await
}

async fn hydrate_one<C>(mut doc: Document, converter: &C) -> Document
where
    C: TextConverter + Sync,
{
    let category = doc.category.as_ref().map(|c| c.as_str().to_string());
    let text = match ContentSource::for_document(&doc) {
        ContentSource::Markup(markup) => markup_to_text(markup),
        ContentSource::Url(url) => match converter.url_to_text(url, category.as_deref()).await {
            Ok(text) => text,
            Err(e) => match doc.inline_markup() {
                Some(markup) => {
                    debug!(
                        document = %doc.id,
                        url,
                        error = %e,
                        "conversion failed, using inline markup"
                    );
                    markup_to_text(markup)
                }
                None => {
                    warn!(document = %doc.id, url, error = %e, "content conversion failed");
                    String::new()
                }
            },
        },
        ContentSource::Unavailable => {
            debug!(document = %doc.id, "no markup or URL to hydrate from");
            String::new()
        }
    };
    doc.content = Some(text);
    doc
}
