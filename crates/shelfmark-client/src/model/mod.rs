//! Data transfer types exchanged with the document service.

mod document;
mod params;
mod tag;

pub use document::{Category, Document, DocumentTags, ListPage, Location, TagRef};
pub use params::{CreateDocumentParams, ListDocumentsParams, UpdateDocumentParams};
pub use tag::Tag;
