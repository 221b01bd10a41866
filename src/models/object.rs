//! Represents an object stored under a bucket/key pair.

use crate::models::content::Content;
use serde::{Deserialize, Serialize};

/// A stored object: identity, causal context, and one or more content
/// versions.
///
/// Identity is `(bucket, key)`; `key` may be absent, in which case the
/// mapper asks its key generator for one during `dump` (or the server
/// assigns one on POST). The object has no persistent identity beyond the
/// call that produced it.
///
/// When the store returns multiple causally-unordered versions for the same
/// key, `conflict` is set and each version becomes an entry in `siblings`;
/// `content` is then meaningless until a resolution step chooses one. When
/// `conflict` is false, `content` is the single authoritative version and
/// `siblings` is empty. Every sibling carries the parent's vector clock.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Object {
    /// Bucket holding the object.
    pub bucket: String,

    /// Key within the bucket; `None` until generated or server-assigned.
    pub key: Option<String>,

    /// Opaque causality marker, base64-textual at this boundary. The wire
    /// carries it as raw bytes; the mapper transcodes in both directions.
    pub vclock: Option<String>,

    /// The authoritative content version (only when `conflict` is false).
    pub content: Content,

    /// Whether the store returned concurrent sibling versions.
    pub conflict: bool,

    /// Sibling versions; populated only when `conflict` is set, and then
    /// always holds at least two entries.
    pub siblings: Vec<Object>,
}

impl Object {
    /// A fresh object with no key, no vector clock, and empty content.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// A fresh object with a known key.
    pub fn with_key(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: Some(key.into()),
            ..Default::default()
        }
    }
}
