//! Request parameter types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{Category, Location};

/// Query configuration for listing documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsParams {
    /// Fetch a single document by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Only documents updated after this timestamp (sent as-is).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_after: Option<String>,
    /// Only documents saved after this time. Filtered locally, never sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_after: Option<DateTime<Utc>>,
    /// Workflow location filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Category filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Tag filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Pagination cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_cursor: Option<String>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Keep raw markup on returned documents.
    #[serde(default)]
    pub with_html_content: bool,
    /// Hydrate plain-text content for returned documents.
    #[serde(default)]
    pub with_full_content: bool,
}

impl ListDocumentsParams {
    /// True if the caller pinned a page with a cursor or limit.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.page_cursor.is_some() || self.limit.is_some()
    }

    /// Query pairs sent to the service.
    ///
    /// `addedAfter` and `withFullContent` stay local. Markup is requested
    /// whenever full content is, so hydration can use it.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: String| query.push((key.to_string(), value));

        if let Some(id) = &self.id {
            push("id", id.clone());
        }
        if let Some(updated_after) = &self.updated_after {
            push("updatedAfter", updated_after.clone());
        }
        if let Some(location) = self.location {
            push("location", location.as_str().to_string());
        }
        if let Some(category) = &self.category {
            push("category", category.as_str().to_string());
        }
        if let Some(tag) = &self.tag {
            push("tag", tag.clone());
        }
        if let Some(cursor) = &self.page_cursor {
            push("pageCursor", cursor.clone());
        }
        if let Some(limit) = self.limit {
            push("limit", limit.to_string());
        }
        if self.with_html_content || self.with_full_content {
            push("withHtmlContent", "true".to_string());
        }
        query
    }

    /// Same filters with content flags, cursor and client-only filters
    /// removed.
    #[must_use]
    pub fn metadata_only(&self) -> Self {
        Self {
            added_after: None,
            page_cursor: None,
            limit: None,
            with_html_content: false,
            with_full_content: false,
            ..self.clone()
        }
    }
}

/// Fields for saving a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentParams {
    /// Document URL; required by the service.
    pub url: String,
    /// Raw HTML to store instead of scraping the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Let the service clean the provided HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_clean_html: Option<bool>,
    /// Title override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Publication date (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Initial location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Category override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Name of the saving application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_using: Option<String>,
    /// Tag names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Top-level note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateDocumentParams {
    /// Creates parameters for the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a document. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDocumentParams {
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Publication date (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Replacement tag names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateDocumentParams {
    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
