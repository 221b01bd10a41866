//! Resource-path construction and validation.
//!
//! Paths are ordered segments joined with `/`, collapsed, stripped of any
//! leading slash, and resolved against the configured root URI. A query
//! string is appended only when parameters were supplied.

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};
use http::Uri;

/// Fails unless more than one segment was given, with one carve-out: the
/// map-reduce endpoint is addressed by a single segment and is allowed
/// through.
pub fn verify_path(segments: &[&str], mapred_path: &str) -> ClientResult<()> {
    match segments {
        [] => Err(ClientError::PathTooShort),
        [single] if *single == mapred_path => Ok(()),
        [_] => Err(ClientError::PathTooShort),
        _ => Ok(()),
    }
}

/// Build the absolute URI for `segments` plus an optional query mapping.
pub fn build_uri(
    config: &ClientConfig,
    segments: &[&str],
    query: &[(&str, &str)],
) -> ClientResult<Uri> {
    let joined = collapse_slashes(&segments.join("/"));
    let path = joined.trim_start_matches('/');

    let mut uri = format!("{}/{}", config.root_uri(), path);
    if !query.is_empty() {
        uri.push('?');
        for (i, (key, value)) in query.iter().enumerate() {
            if i > 0 {
                uri.push('&');
            }
            uri.push_str(&escape(key));
            uri.push('=');
            uri.push_str(&escape(value));
        }
    }

    Ok(Uri::try_from(uri)?)
}

/// Collapse any run of multiple slashes into one.
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

/// Percent-encode a query component, leaving RFC 3986 unreserved
/// characters as-is.
fn escape(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for byte in component.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
