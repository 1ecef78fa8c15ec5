//! Full-content count guard.
//!
//! Hydrating content is expensive, so a full-content listing first asks the
//! service how many documents match and picks one of the rules below, in
//! order.

use crate::response::ApiMessage;

/// Documents returned with full content when the match count is capped.
pub const FULL_CONTENT_PAGE: u32 = 5;

/// Largest match count that is still answered with an advisory note rather
/// than an error message.
pub const FULL_CONTENT_MAX: u64 = 20;

/// Outcome of the count guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentGuard {
    /// Few enough matches: fetch them all with content.
    Complete,
    /// Fetch the first page with content and point at the rest.
    Truncated {
        /// Total matches.
        total: u64,
    },
    /// Too many matches for full content; still return the first page.
    Unsupported {
        /// Total matches.
        total: u64,
    },
}

struct Rule {
    applies: fn(u64) -> bool,
    decide: fn(u64) -> ContentGuard,
}

const RULES: [Rule; 3] = [
    Rule {
        applies: |total| total <= u64::from(FULL_CONTENT_PAGE),
        decide: |_| ContentGuard::Complete,
    },
    Rule {
        applies: |total| total <= FULL_CONTENT_MAX,
        decide: |total| ContentGuard::Truncated { total },
    },
    Rule {
        applies: |_| true,
        decide: |total| ContentGuard::Unsupported { total },
    },
];

impl ContentGuard {
    /// Picks the first rule matching `total`.
    #[must_use]
    pub fn evaluate(total: u64) -> Self {
        RULES
            .iter()
            .find(|rule| (rule.applies)(total))
            .map_or(Self::Unsupported { total }, |rule| (rule.decide)(total))
    }

    /// Page size to request, if capped.
    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        match self {
            Self::Complete => None,
            Self::Truncated { .. } | Self::Unsupported { .. } => Some(FULL_CONTENT_PAGE),
        }
    }

    /// Advisory message for the response, if any, for the standard page
    /// size.
    #[must_use]
    pub fn message(self) -> Option<ApiMessage> {
        self.message_for(u64::from(FULL_CONTENT_PAGE), false)
    }

    /// Advisory message when `returned` documents get full content.
    ///
    /// `before_date_filter` marks the matched total as counted before local
    /// `addedAfter` filtering, so it can exceed the documents that survive.
    #[must_use]
    pub fn message_for(self, returned: u64, before_date_filter: bool) -> Option<ApiMessage> {
        let scope = if before_date_filter {
            " before the addedAfter filter"
        } else {
            ""
        };
        match self {
            Self::Complete => None,
            Self::Truncated { total } => Some(ApiMessage::info(format!(
                "Found {total} documents{scope}, but full content is only returned for the \
                 first {returned}. The remaining {} documents were not fetched with content; \
                 request them by ID to get their full content.",
                total.saturating_sub(returned)
            ))),
            Self::Unsupported { total } => Some(ApiMessage::error(format!(
                "Full content for more than {FULL_CONTENT_MAX} documents is not supported due to \
                 performance limitations ({total} documents matched{scope}). Only the first \
                 {returned} are returned with full content; narrow the filters or request \
                 documents by ID."
            ))),
        }
    }
}
