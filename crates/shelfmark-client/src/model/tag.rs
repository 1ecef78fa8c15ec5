//! Tag records.

use serde::{Deserialize, Serialize};

/// A tag defined in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable key.
    pub key: String,
    /// Display name.
    pub name: String,
}
