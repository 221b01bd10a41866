//! Typed relationship between two stored objects.

use serde::{Deserialize, Serialize};

/// A directed, tagged link from one object to another.
///
/// `key` is optional because applications sometimes build links before the
/// target key is known; such a link is invalid on the wire and the codecs
/// drop it during encoding rather than emit a malformed relationship.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Bucket of the link target.
    pub bucket: String,

    /// Key of the link target. `None` or empty makes the link unencodable.
    pub key: Option<String>,

    /// Relationship tag (e.g. "parent", "next").
    pub tag: String,
}

impl Link {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: Some(key.into()),
            tag: tag.into(),
        }
    }
}
