//! Verb-level HTTP transport contract.
//!
//! [`Transport`] defines what every concrete request executor must honor
//! identically: default-header assembly, path construction and validation,
//! and the response-body inclusion policy. The executor itself — sockets,
//! TLS, pooling, retries — lives behind the single required
//! [`Transport::perform`] method; this module never touches the network.

pub mod headers;
pub mod path;

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use std::io::Read;

pub use headers::{ACCEPT_VALUE, CLIENT_ID_HEADER, default_headers, encode_client_id, merge_headers};
pub use path::{build_uri, verify_path};

/// Request body: either bytes already in memory or a readable stream the
/// executor drains. Anything else is unrepresentable, which is the point.
pub enum Body {
    Bytes(Bytes),
    Reader(Box<dyn Read + Send>),
}

impl Body {
    /// Drain the body into memory, whichever variant it is.
    pub fn into_bytes(self) -> ClientResult<Bytes> {
        match self {
            Body::Bytes(bytes) => Ok(bytes),
            Body::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(buf.into())
            }
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes.into())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Bytes(text.into())
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

/// Sink receiving response chunks as they arrive. Supplying one switches
/// the call to streaming delivery: the body arrives here instead of on the
/// returned [`Response`].
pub type ChunkSink<'a> = &'a mut dyn FnMut(&[u8]);

/// Everything a concrete executor needs to run one request.
pub struct Request<'a> {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub expected: &'a [u16],
    pub body: Option<Body>,
    pub sink: Option<ChunkSink<'a>>,
}

impl Request<'_> {
    pub fn streaming(&self) -> bool {
        self.sink.is_some()
    }
}

/// Outcome of one request. Headers are always present — including on
/// streaming calls, where the body went to the sink instead — so callers
/// needing out-of-band header inspection read them here rather than from
/// any ambient holder.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// Membership test an executor applies to the actual response code.
pub fn valid(expected: &[u16], actual: StatusCode) -> bool {
    expected.contains(&actual.as_u16())
}

/// Whether a response body should be materialized on the [`Response`].
///
/// Never for HEAD, never for the no-content status family, and never when
/// the caller asked for streaming delivery.
pub fn include_body(method: &Method, status: StatusCode, streaming: bool) -> bool {
    if *method == Method::HEAD || streaming {
        return false;
    }
    !matches!(status.as_u16(), 204 | 205 | 304)
}

/// Verb semantics every executor inherits.
///
/// Each verb merges caller headers over the default set (caller wins on
/// collision), validates the resource path, builds the absolute URI, and
/// delegates to [`perform`](Transport::perform). Binding an executor means
/// implementing `perform`; the compiler enforces that there is no unbound
/// transport at runtime.
pub trait Transport {
    fn config(&self) -> &ClientConfig;

    /// Execute one request. Implementations must compare the response code
    /// via [`valid`] and materialize the body per [`include_body`].
    fn perform(&self, request: Request<'_>) -> ClientResult<Response>;

    fn head(
        &self,
        expected: &[u16],
        segments: &[&str],
        query: &[(&str, &str)],
        extra_headers: HeaderMap,
    ) -> ClientResult<Response> {
        self.dispatch(Method::HEAD, expected, segments, query, extra_headers, None, None)
    }

    fn get<'a>(
        &self,
        expected: &'a [u16],
        segments: &[&str],
        query: &[(&str, &str)],
        extra_headers: HeaderMap,
        sink: Option<ChunkSink<'a>>,
    ) -> ClientResult<Response> {
        self.dispatch(Method::GET, expected, segments, query, extra_headers, None, sink)
    }

    fn put<'a>(
        &self,
        expected: &'a [u16],
        segments: &[&str],
        query: &[(&str, &str)],
        extra_headers: HeaderMap,
        body: Body,
        sink: Option<ChunkSink<'a>>,
    ) -> ClientResult<Response> {
        self.dispatch(Method::PUT, expected, segments, query, extra_headers, Some(body), sink)
    }

    fn post<'a>(
        &self,
        expected: &'a [u16],
        segments: &[&str],
        query: &[(&str, &str)],
        extra_headers: HeaderMap,
        body: Body,
        sink: Option<ChunkSink<'a>>,
    ) -> ClientResult<Response> {
        self.dispatch(Method::POST, expected, segments, query, extra_headers, Some(body), sink)
    }

    fn delete<'a>(
        &self,
        expected: &'a [u16],
        segments: &[&str],
        query: &[(&str, &str)],
        extra_headers: HeaderMap,
        sink: Option<ChunkSink<'a>>,
    ) -> ClientResult<Response> {
        self.dispatch(Method::DELETE, expected, segments, query, extra_headers, None, sink)
    }

    /// Shared plumbing behind every verb. Not meant to be overridden.
    #[allow(clippy::too_many_arguments)]
    fn dispatch<'a>(
        &self,
        method: Method,
        expected: &'a [u16],
        segments: &[&str],
        query: &[(&str, &str)],
        extra_headers: HeaderMap,
        body: Option<Body>,
        sink: Option<ChunkSink<'a>>,
    ) -> ClientResult<Response> {
        let config = self.config();
        path::verify_path(segments, &config.mapred_path)?;
        let uri = path::build_uri(config, segments, query)?;
        let merged = headers::merge_headers(headers::default_headers(config)?, &extra_headers);

        self.perform(Request {
            method,
            uri,
            headers: merged,
            expected,
            body,
            sink,
        })
    }
}

/// Error an executor should construct after [`valid`] rejects a code.
pub fn unexpected_status(expected: &[u16], actual: StatusCode) -> ClientError {
    ClientError::UnexpectedStatus {
        expected: expected.to_vec(),
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_body_policy_table() {
        assert!(!include_body(&Method::HEAD, StatusCode::OK, false));
        assert!(!include_body(&Method::GET, StatusCode::NO_CONTENT, false));
        assert!(!include_body(&Method::GET, StatusCode::RESET_CONTENT, false));
        assert!(!include_body(&Method::GET, StatusCode::NOT_MODIFIED, false));
        assert!(!include_body(&Method::GET, StatusCode::OK, true));
        assert!(include_body(&Method::GET, StatusCode::OK, false));
        assert!(include_body(&Method::PUT, StatusCode::CREATED, false));
    }

    #[test]
    fn valid_is_plain_membership() {
        assert!(valid(&[200, 204], StatusCode::NO_CONTENT));
        assert!(!valid(&[200, 204], StatusCode::NOT_FOUND));
        assert!(!valid(&[], StatusCode::OK));
    }

    #[test]
    fn reader_bodies_drain_to_bytes() {
        let body = Body::Reader(Box::new(std::io::Cursor::new(b"streamed".to_vec())));
        assert_eq!(body.into_bytes().unwrap(), Bytes::from_static(b"streamed"));
    }
}
