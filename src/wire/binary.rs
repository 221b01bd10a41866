//! Binary-message codec strategy: pair, link, and content translation
//! between the in-memory model and the typed message shapes in
//! [`message`](crate::wire::message).

use crate::errors::{ClientError, ClientResult};
use crate::models::content::{Content, DEFAULT_CONTENT_TYPE};
use crate::models::link::Link;
use crate::wire::charset::{CharsetRegistry, DefaultCharsets};
use crate::wire::codec::ContentCodec;
use crate::wire::message::{WireContent, WireLink, WirePair};
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Encode one metadata or index pair.
///
/// A pair with an empty value is not representable on the wire and yields
/// `None`; callers drop it rather than emit it.
pub fn encode_pair(key: &str, value: &str) -> Option<WirePair> {
    if value.is_empty() {
        return None;
    }
    Some(WirePair {
        key: Bytes::copy_from_slice(key.as_bytes()),
        value: Bytes::copy_from_slice(value.as_bytes()),
    })
}

/// Decode one pair into `target`, overwriting any existing entry for the
/// same key.
pub fn decode_pair(pair: &WirePair, target: &mut HashMap<String, String>) {
    target.insert(
        String::from_utf8_lossy(&pair.key).into_owned(),
        String::from_utf8_lossy(&pair.value).into_owned(),
    );
}

/// Encode a link, or `None` when the link has no target key — a keyless
/// link is malformed and must never reach the wire.
pub fn encode_link(link: &Link) -> Option<WireLink> {
    let key = link.key.as_deref().filter(|k| !k.is_empty())?;
    Some(WireLink {
        bucket: Bytes::copy_from_slice(link.bucket.as_bytes()),
        key: Bytes::copy_from_slice(key.as_bytes()),
        tag: Bytes::copy_from_slice(link.tag.as_bytes()),
    })
}

/// Decode a link by direct field copy; the server is trusted here.
pub fn decode_link(link: &WireLink) -> Link {
    Link {
        bucket: String::from_utf8_lossy(&link.bucket).into_owned(),
        key: Some(String::from_utf8_lossy(&link.key).into_owned()),
        tag: String::from_utf8_lossy(&link.tag).into_owned(),
    }
}

/// Content codec for the binary message encoding.
#[derive(Debug, Clone, Default)]
pub struct BinaryContentCodec<R = DefaultCharsets> {
    charsets: R,
}

impl<R: CharsetRegistry> BinaryContentCodec<R> {
    pub fn with_registry(charsets: R) -> Self {
        Self { charsets }
    }
}

impl<R: CharsetRegistry> ContentCodec for BinaryContentCodec<R> {
    type Repr = WireContent;

    /// Value, content type, and the filtered link list always go out;
    /// metadata/index pairs, vtag, and charset only when present.
    fn encode(&self, content: &Content) -> ClientResult<WireContent> {
        let mut wire = WireContent {
            value: content.value.clone(),
            content_type: Bytes::copy_from_slice(content.content_type.as_bytes()),
            links: content.links.iter().filter_map(encode_link).collect(),
            ..Default::default()
        };

        if !content.meta.is_empty() {
            wire.usermeta = content
                .meta
                .iter()
                .filter_map(|(k, v)| encode_pair(k, v))
                .collect();
        }
        if !content.indexes.is_empty() {
            wire.indexes = content
                .indexes
                .iter()
                .filter_map(|(k, v)| encode_pair(k, v))
                .collect();
        }
        if let Some(vtag) = content.vtag.as_deref().filter(|v| !v.trim().is_empty()) {
            wire.vtag = Some(Bytes::copy_from_slice(vtag.as_bytes()));
        }
        if let Some(charset) = content.charset.as_deref().filter(|c| !c.trim().is_empty()) {
            wire.charset = Some(Bytes::copy_from_slice(charset.as_bytes()));
        }

        Ok(wire)
    }

    fn decode(&self, wire: &WireContent) -> ClientResult<Content> {
        let mut content = Content {
            value: wire.value.clone(),
            content_type: DEFAULT_CONTENT_TYPE.into(),
            ..Default::default()
        };

        let content_type = String::from_utf8_lossy(&wire.content_type);
        if !content_type.trim().is_empty() {
            content.content_type = content_type.into_owned();
        }

        if let Some(label) = wire.charset.as_deref() {
            let label = String::from_utf8_lossy(label);
            match self.charsets.lookup(&label) {
                Some(canonical) => content.charset = Some(canonical.to_string()),
                None => {
                    // Tolerated: payload stays opaque bytes.
                    warn!(charset = %label, "unrecognized charset label on wire content");
                }
            }
        }

        if let Some(vtag) = wire.vtag.as_deref() {
            let vtag = String::from_utf8_lossy(vtag);
            if !vtag.trim().is_empty() {
                content.vtag = Some(vtag.into_owned());
            }
        }

        if !wire.links.is_empty() {
            content.links = wire.links.iter().map(decode_link).collect();
        }
        for pair in &wire.usermeta {
            decode_pair(pair, &mut content.meta);
        }
        for pair in &wire.indexes {
            decode_pair(pair, &mut content.indexes);
        }

        if let Some(secs) = wire.last_mod {
            let nanos = u64::from(wire.last_mod_usecs.unwrap_or(0)) * 1_000;
            let nanos = u32::try_from(nanos)
                .map_err(|_| ClientError::Decode("last_mod_usecs out of range".into()))?;
            content.last_modified = Utc
                .timestamp_opt(i64::from(secs), nanos)
                .single()
                .ok_or_else(|| ClientError::Decode("last_mod timestamp out of range".into()))
                .map(Some)?;
        }

        Ok(content)
    }
}
