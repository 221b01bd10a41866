//! HTTP/MIME codec strategy: the same logical content model carried as a
//! header map plus body bytes.
//!
//! Metadata pairs travel as `X-Cirrus-Meta-*` headers, index pairs as
//! `X-Cirrus-Index-*`, links as RFC 8288-style `Link` entries pointing at
//! `/buckets/{bucket}/keys/{key}`.

use crate::errors::{ClientError, ClientResult};
use crate::models::content::{Content, DEFAULT_CONTENT_TYPE};
use crate::models::link::Link;
use crate::wire::charset::{CharsetRegistry, DefaultCharsets};
use crate::wire::codec::ContentCodec;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

pub const META_PREFIX: &str = "x-cirrus-meta-";
pub const INDEX_PREFIX: &str = "x-cirrus-index-";

/// Content codec for the HTTP/MIME encoding.
#[derive(Debug, Clone, Default)]
pub struct HttpContentCodec<R = DefaultCharsets> {
    charsets: R,
}

impl<R: CharsetRegistry> HttpContentCodec<R> {
    pub fn with_registry(charsets: R) -> Self {
        Self { charsets }
    }
}

impl<R: CharsetRegistry> ContentCodec for HttpContentCodec<R> {
    type Repr = (HeaderMap, Bytes);

    fn encode(&self, content: &Content) -> ClientResult<(HeaderMap, Bytes)> {
        let mut headers = HeaderMap::new();

        let content_type = match content.charset.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(charset) => format!("{}; charset={}", content.content_type, charset),
            None => content.content_type.clone(),
        };
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(&content_type)?);

        if let Some(vtag) = content.vtag.as_deref().filter(|v| !v.trim().is_empty()) {
            headers.insert(header::ETAG, HeaderValue::from_str(&format!("\"{}\"", vtag))?);
        }

        if let Some(ts) = content.last_modified {
            headers.insert(header::LAST_MODIFIED, HeaderValue::from_str(&ts.to_rfc2822())?);
        }

        let link_entries: Vec<String> = content
            .links
            .iter()
            .filter_map(encode_link_entry)
            .collect();
        if !link_entries.is_empty() {
            headers.insert(header::LINK, HeaderValue::from_str(&link_entries.join(", "))?);
        }

        for (key, value) in &content.meta {
            if value.is_empty() {
                continue;
            }
            let name = HeaderName::try_from(format!("{}{}", META_PREFIX, key.to_lowercase()))?;
            headers.append(name, HeaderValue::from_str(value)?);
        }
        for (key, value) in &content.indexes {
            if value.is_empty() {
                continue;
            }
            let name = HeaderName::try_from(format!("{}{}", INDEX_PREFIX, key.to_lowercase()))?;
            headers.append(name, HeaderValue::from_str(value)?);
        }

        Ok((headers, content.value.clone()))
    }

    fn decode(&self, repr: &(HeaderMap, Bytes)) -> ClientResult<Content> {
        let (headers, body) = repr;
        let mut content = Content {
            value: body.clone(),
            content_type: DEFAULT_CONTENT_TYPE.into(),
            ..Default::default()
        };

        if let Some(raw) = header_str(headers, &header::CONTENT_TYPE) {
            let (media_type, charset) = split_content_type(raw);
            if !media_type.is_empty() {
                content.content_type = media_type.to_string();
            }
            if let Some(label) = charset {
                match self.charsets.lookup(label) {
                    Some(canonical) => content.charset = Some(canonical.to_string()),
                    None => warn!(charset = %label, "unrecognized charset label in Content-Type"),
                }
            }
        }

        if let Some(etag) = header_str(headers, &header::ETAG) {
            let vtag = etag.trim().trim_matches('"');
            if !vtag.is_empty() {
                content.vtag = Some(vtag.to_string());
            }
        }

        if let Some(raw) = header_str(headers, &header::LAST_MODIFIED) {
            let parsed = DateTime::parse_from_rfc2822(raw)
                .map_err(|err| ClientError::Decode(format!("bad Last-Modified `{}`: {}", raw, err)))?;
            content.last_modified = Some(parsed.with_timezone(&Utc));
        }

        for value in headers.get_all(header::LINK) {
            if let Ok(raw) = value.to_str() {
                content.links.extend(raw.split(',').filter_map(decode_link_entry));
            }
        }

        for (name, value) in headers {
            let name = name.as_str();
            let Ok(value) = value.to_str() else { continue };
            if let Some(key) = name.strip_prefix(META_PREFIX) {
                content.meta.insert(key.to_string(), value.to_string());
            } else if let Some(key) = name.strip_prefix(INDEX_PREFIX) {
                content.indexes.insert(key.to_string(), value.to_string());
            }
        }

        Ok(content)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// `type/subtype; charset=label` → (`type/subtype`, `Some(label)`).
fn split_content_type(raw: &str) -> (&str, Option<&str>) {
    let mut parts = raw.split(';');
    let media_type = parts.next().unwrap_or("").trim();
    let charset = parts
        .filter_map(|p| p.trim().strip_prefix("charset="))
        .map(|c| c.trim_matches('"'))
        .next();
    (media_type, charset)
}

/// One `Link` header entry, or `None` for a keyless link.
fn encode_link_entry(link: &Link) -> Option<String> {
    let key = link.key.as_deref().filter(|k| !k.is_empty())?;
    Some(format!(
        "</buckets/{}/keys/{}>; tag=\"{}\"",
        link.bucket, key, link.tag
    ))
}

/// Parse `</buckets/{b}/keys/{k}>; tag="t"`. Entries in any other shape
/// are skipped; the server is trusted but other relation types (e.g. the
/// bucket's own `rel="up"` entry) are not object links.
fn decode_link_entry(entry: &str) -> Option<Link> {
    let entry = entry.trim();
    let target = entry.strip_prefix('<')?.split('>').next()?;
    let mut segments = target.trim_matches('/').split('/');
    if segments.next()? != "buckets" {
        return None;
    }
    let bucket = segments.next()?;
    if segments.next()? != "keys" {
        return None;
    }
    let key = segments.next()?;

    let tag = entry
        .split(';')
        .filter_map(|p| p.trim().strip_prefix("tag="))
        .map(|t| t.trim_matches('"'))
        .next()?;

    Some(Link::new(bucket, key, tag))
}
