//! Document records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of saved document.
///
/// Unknown values reported by the service are kept verbatim in
/// [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Web article.
    Article,
    /// Newsletter or forwarded email.
    Email,
    /// RSS feed item.
    Rss,
    /// Standalone highlight.
    Highlight,
    /// Note.
    Note,
    /// PDF file.
    Pdf,
    /// EPUB book.
    Epub,
    /// Tweet or thread.
    Tweet,
    /// Video.
    Video,
    /// Anything else.
    Other(String),
}

impl Category {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::Email => "email",
            Self::Rss => "rss",
            Self::Highlight => "highlight",
            Self::Note => "note",
            Self::Pdf => "pdf",
            Self::Epub => "epub",
            Self::Tweet => "tweet",
            Self::Video => "video",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "article" => Self::Article,
            "email" => Self::Email,
            "rss" => Self::Rss,
            "highlight" => Self::Highlight,
            "note" => Self::Note,
            "pdf" => Self::Pdf,
            "epub" => Self::Epub,
            "tweet" => Self::Tweet,
            "video" => Self::Video,
            _ => Self::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a document sits in the reading workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Inbox.
    New,
    /// Saved for later.
    Later,
    /// Shortlisted.
    Shortlist,
    /// Archived.
    Archive,
    /// Feed.
    Feed,
}

impl Location {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Later => "later",
            Self::Shortlist => "shortlist",
            Self::Archive => "archive",
            Self::Feed => "feed",
        }
    }
}

/// Tag entry in the keyed tag form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    /// Display name.
    pub name: String,
    /// Tag origin (`manual`, `generated`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Creation time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

/// Tags on a document. The service reports either a list of names or a map
/// keyed by tag key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentTags {
    /// Ordered tag names.
    Names(Vec<String>),
    /// Tags keyed by tag key.
    Keyed(BTreeMap<String, TagRef>),
}

impl Default for DocumentTags {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

impl DocumentTags {
    /// Tag names in their stored order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Names(names) => names.iter().map(String::as_str).collect(),
            Self::Keyed(map) => map.values().map(|t| t.name.as_str()).collect(),
        }
    }

    /// Returns true when there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Names(names) => names.is_empty(),
            Self::Keyed(map) => map.is_empty(),
        }
    }
}

/// A document owned by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier.
    pub id: String,
    /// Reader URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Original location of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Source application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Kind of document; absent or empty for some saved pages.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Workflow location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Tags.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "DocumentTags::is_empty")]
    pub tags: DocumentTags,
    /// Site name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    /// Word count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// User notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Publication date as reported (string or epoch number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<serde_json::Value>,
    /// Containing document, for highlights and notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Reading progress between 0 and 1.
    #[serde(default)]
    pub reading_progress: f64,
    /// Creation time.
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Time the document was saved to the library.
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// First open.
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub first_opened_at: Option<DateTime<Utc>>,
    /// Most recent open.
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub last_opened_at: Option<DateTime<Utc>>,
    /// Last location change.
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub last_moved_at: Option<DateTime<Utc>>,
    /// Raw markup, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    /// Plain text, filled in by content hydration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Document {
    /// URL to fetch the content from: `source_url`, else `url`.
    #[must_use]
    pub fn content_url(&self) -> Option<&str> {
        self.source_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
    }

    /// Inline markup, if non-empty.
    #[must_use]
    pub fn inline_markup(&self) -> Option<&str> {
        self.html_content.as_deref().filter(|h| !h.trim().is_empty())
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Total matches for the query, or the number of results after
    /// client-side filtering.
    #[serde(default)]
    pub count: u64,
    /// Cursor for the next page; absent on the last page.
    #[serde(
        rename = "nextPageCursor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_page_cursor: Option<String>,
    /// Results in server order.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> ListPage<T> {
    /// Cursor for the next page, treating an empty string as absent.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(Category::from))
}

fn null_as_default<'de, D>(deserializer: D) -> Result<DocumentTags, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DocumentTags>::deserialize(deserializer)?.unwrap_or_default())
}
