//! # shelfmark-text
//!
//! Plain-text extraction for saved documents.
//!
//! Two collaborators live here:
//!
//! - [`markup_to_text`] turns inline HTML into readable Markdown-flavoured
//!   text. It is pure and never fails.
//! - [`TextConverter`] fetches a document's source URL and turns whatever it
//!   finds there into text. [`HttpTextConverter`] is the reqwest-backed
//!   implementation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use shelfmark_text::{HttpTextConverter, TextConverter, markup_to_text};
//!
//! let text = markup_to_text("<h1>Hello</h1><p>world</p>");
//! assert!(text.contains("Hello"));
//!
//! let converter = HttpTextConverter::new()?;
//! let article = converter.url_to_text("https://example.com/post", Some("article")).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod convert;
mod error;
mod markup;

pub use convert::{HttpTextConverter, TextConverter};
pub use error::{Error, Result};
pub use markup::{markup_to_text, strip_tags};
