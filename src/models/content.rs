//! One concrete version of an object's body at some causal point.

use crate::models::link::Link;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single content version: payload plus everything the store tracks
/// alongside it.
///
/// `meta` and `indexes` keep unique keys; the wire format carries them as
/// repeated key/value pairs and decoding overwrites on duplicate keys.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Content {
    /// Raw payload bytes. Binary-safe; no text encoding is applied in
    /// transit.
    pub value: Bytes,

    /// MIME content type of the payload.
    pub content_type: String,

    /// Character-encoding label for the payload, when one is declared.
    pub charset: Option<String>,

    /// Opaque version marker for this content version (cache-validator
    /// analogue).
    pub vtag: Option<String>,

    /// When the store last modified this version.
    pub last_modified: Option<DateTime<Utc>>,

    /// Ordered links to other objects.
    pub links: Vec<Link>,

    /// User metadata attached to this version.
    pub meta: HashMap<String, String>,

    /// Secondary index entries enabling server-side lookup by value.
    pub indexes: HashMap<String, String>,
}

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

impl Content {
    /// A content version holding `value` with the default content type.
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self {
            value: value.into(),
            content_type: DEFAULT_CONTENT_TYPE.into(),
            ..Default::default()
        }
    }
}
