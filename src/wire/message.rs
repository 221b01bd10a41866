//! Typed shapes of the binary wire messages.
//!
//! Field names are compatibility-critical: they mirror the store's message
//! definitions (`bucket`, `key`, `vclock`, `content`, `usermeta`,
//! `indexes`, `last_mod`, `last_mod_usecs`, ...). Every string-valued field
//! travels as raw bytes; no text encoding is applied during transport.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Flat key/value tuple used for user metadata and secondary indexes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WirePair {
    pub key: Bytes,
    pub value: Bytes,
}

/// Typed relationship to another object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WireLink {
    pub bucket: Bytes,
    pub key: Bytes,
    pub tag: Bytes,
}

/// One content version as it appears inside put requests and get responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct WireContent {
    pub value: Bytes,
    pub content_type: Bytes,
    pub charset: Option<Bytes>,
    pub vtag: Option<Bytes>,
    pub links: Vec<WireLink>,
    pub usermeta: Vec<WirePair>,
    pub indexes: Vec<WirePair>,
    pub last_mod: Option<u32>,
    pub last_mod_usecs: Option<u32>,
}

/// Put request carrying exactly one content version.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct WirePutRequest {
    pub bucket: Bytes,
    pub key: Bytes,
    pub vclock: Option<Bytes>,
    pub content: WireContent,
}

/// Get response: raw vector clock plus one content entry per sibling.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct WireGetResponse {
    pub vclock: Option<Bytes>,
    pub contents: Vec<WireContent>,
}
