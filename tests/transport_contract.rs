//! End-to-end exercise of the verb contract against a scripted executor,
//! plus the dump → put-request → get-response → load cycle.

use bytes::Bytes;
use cirrus_client::config::{ClientConfig, ClientId};
use cirrus_client::errors::{ClientError, ClientResult};
use cirrus_client::models::Object;
use cirrus_client::transport::{
    self, Body, CLIENT_ID_HEADER, Request, Response, Transport,
};
use cirrus_client::wire::{ObjectMapper, WireGetResponse};
use http::header::{self, HeaderMap, HeaderValue};
use http::{Method, StatusCode};
use std::cell::RefCell;

/// What the executor saw for one request.
struct Seen {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    streaming: bool,
}

/// Scripted executor: pops canned (status, body) responses and records
/// everything it is asked to run, applying the response-code and
/// body-inclusion policies the way a real executor must.
struct ScriptedTransport {
    config: ClientConfig,
    script: RefCell<Vec<(StatusCode, Bytes)>>,
    seen: RefCell<Vec<Seen>>,
}

impl ScriptedTransport {
    fn new(script: Vec<(StatusCode, Bytes)>) -> Self {
        Self {
            config: ClientConfig::default(),
            script: RefCell::new(script),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn perform(&self, request: Request<'_>) -> ClientResult<Response> {
        let (status, canned_body) = self.script.borrow_mut().remove(0);
        let streaming = request.streaming();

        let request_body = match request.body {
            Some(body) => Some(body.into_bytes()?),
            None => None,
        };
        self.seen.borrow_mut().push(Seen {
            method: request.method.clone(),
            uri: request.uri.to_string(),
            headers: request.headers,
            body: request_body,
            streaming,
        });

        if !transport::valid(request.expected, status) {
            return Err(transport::unexpected_status(request.expected, status));
        }

        if let Some(sink) = request.sink {
            for chunk in canned_body.chunks(4) {
                sink(chunk);
            }
        }

        let body = transport::include_body(&request.method, status, streaming)
            .then(|| canned_body.clone());
        Ok(Response {
            status,
            headers: HeaderMap::new(),
            body,
        })
    }
}

#[test]
fn get_builds_uri_and_default_headers() {
    let transport = ScriptedTransport::new(vec![(StatusCode::OK, Bytes::from_static(b"body"))]);
    let response = transport
        .get(
            &[200, 300],
            &["buckets", "people", "keys", "carol"],
            &[("r", "2")],
            HeaderMap::new(),
            None,
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Some(Bytes::from_static(b"body")));

    let seen = transport.seen.borrow();
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(
        seen[0].uri,
        "http://127.0.0.1:8098/buckets/people/keys/carol?r=2"
    );
    assert_eq!(
        seen[0].headers.get(header::ACCEPT).unwrap(),
        transport::ACCEPT_VALUE
    );
    assert!(seen[0].headers.get(CLIENT_ID_HEADER).is_some());
}

#[test]
fn caller_headers_override_defaults_per_request() {
    let transport = ScriptedTransport::new(vec![(StatusCode::OK, Bytes::new())]);
    let mut extra = HeaderMap::new();
    extra.insert(header::ACCEPT, HeaderValue::from_static("multipart/mixed"));

    transport
        .get(&[200], &["buckets", "people", "keys", "carol"], &[], extra, None)
        .unwrap();

    let seen = transport.seen.borrow();
    assert_eq!(seen[0].headers.get(header::ACCEPT).unwrap(), "multipart/mixed");
}

#[test]
fn head_never_carries_a_body() {
    let transport = ScriptedTransport::new(vec![(StatusCode::OK, Bytes::from_static(b"ignored"))]);
    let response = transport
        .head(&[200, 404], &["buckets", "people", "keys", "carol"], &[], HeaderMap::new())
        .unwrap();
    assert_eq!(response.body, None);
}

#[test]
fn put_sends_the_serialized_object() {
    let mapper = ObjectMapper::with_defaults();
    let mut object = Object::with_key("people", "carol");
    object.content.value = Bytes::from_static(b"{\"age\":34}");
    object.content.content_type = "application/json".into();
    let put_request = mapper.dump(&mut object).unwrap();

    let transport = ScriptedTransport::new(vec![(StatusCode::NO_CONTENT, Bytes::new())]);
    let response = transport
        .put(
            &[200, 204, 300],
            &["buckets", "people", "keys", "carol"],
            &[],
            HeaderMap::new(),
            Body::from(put_request.content.value.to_vec()),
            None,
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body, None);

    let seen = transport.seen.borrow();
    assert_eq!(seen[0].method, Method::PUT);
    assert_eq!(seen[0].body.as_deref(), Some(&b"{\"age\":34}"[..]));
}

#[test]
fn post_to_the_mapred_endpoint_allows_a_single_segment() {
    let job = serde_json::json!({
        "inputs": "people",
        "query": [{"map": {"language": "javascript", "name": "Cirrus.mapValues"}}],
    });

    let transport = ScriptedTransport::new(vec![(StatusCode::OK, Bytes::from_static(b"[]"))]);
    let response = transport
        .post(
            &[200],
            &["mapred"],
            &[],
            HeaderMap::new(),
            Body::from(job.to_string()),
            None,
        )
        .unwrap();

    assert_eq!(response.body, Some(Bytes::from_static(b"[]")));
    assert_eq!(transport.seen.borrow()[0].uri, "http://127.0.0.1:8098/mapred");
}

#[test]
fn short_paths_are_rejected_before_any_request_runs() {
    let transport = ScriptedTransport::new(vec![]);
    let err = transport
        .get(&[200], &["people"], &[], HeaderMap::new(), None)
        .unwrap_err();
    assert!(matches!(err, ClientError::PathTooShort));
    assert!(transport.seen.borrow().is_empty());
}

#[test]
fn streaming_delivers_chunks_to_the_sink_instead_of_the_body() {
    let transport =
        ScriptedTransport::new(vec![(StatusCode::OK, Bytes::from_static(b"chunked-payload"))]);
    let mut received = Vec::new();
    let mut sink = |chunk: &[u8]| received.extend_from_slice(chunk);

    let response = transport
        .get(
            &[200],
            &["buckets", "logs", "keys", "today"],
            &[],
            HeaderMap::new(),
            Some(&mut sink),
        )
        .unwrap();

    assert_eq!(response.body, None);
    assert_eq!(received, b"chunked-payload");
    assert!(transport.seen.borrow()[0].streaming);
}

#[test]
fn unexpected_codes_surface_as_errors_from_the_executor() {
    let transport = ScriptedTransport::new(vec![(StatusCode::NOT_FOUND, Bytes::new())]);
    let err = transport
        .delete(&[204], &["buckets", "people", "keys", "gone"], &[], HeaderMap::new(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { actual, .. } if actual == StatusCode::NOT_FOUND
    ));
}

#[test]
fn numeric_client_id_is_packed_on_the_wire() {
    let mut transport = ScriptedTransport::new(vec![(StatusCode::OK, Bytes::new())]);
    transport.config.client_id = ClientId::Number(7);

    transport
        .get(&[200], &["buckets", "b", "keys", "k"], &[], HeaderMap::new(), None)
        .unwrap();

    let seen = transport.seen.borrow();
    assert_eq!(
        seen[0].headers.get(CLIENT_ID_HEADER).unwrap(),
        "AAAABw==" // base64 of [0, 0, 0, 7]
    );
}

#[test]
fn loaded_siblings_inherit_the_response_vclock() {
    use cirrus_client::wire::WireContent;

    let mapper = ObjectMapper::with_defaults();
    let wire = WireGetResponse {
        vclock: Some(Bytes::from_static(b"causal-history")),
        contents: vec![
            WireContent {
                value: Bytes::from_static(b"from-node-a"),
                content_type: Bytes::from_static(b"text/plain"),
                ..Default::default()
            },
            WireContent {
                value: Bytes::from_static(b"from-node-b"),
                content_type: Bytes::from_static(b"text/plain"),
                ..Default::default()
            },
        ],
    };

    let loaded = mapper.load(&wire, Object::with_key("people", "carol")).unwrap();
    assert!(loaded.conflict);
    assert_eq!(loaded.siblings.len(), 2);
    assert!(loaded.siblings.iter().all(|s| s.vclock == loaded.vclock));
}
