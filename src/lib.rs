//! Wire-format mapping and HTTP transport contract for the Cirrus
//! distributed key-value store.
//!
//! Two concerns live here. The [`wire`] layer translates the in-memory
//! object model — value, content type, charset, vector clock, links,
//! metadata, secondary indexes, sibling conflicts — to and from the
//! store's two encodings: the compact binary message shapes and the
//! HTTP/MIME representation. The [`transport`] layer fixes the verb-level
//! semantics (default headers, path construction, response-code and
//! body-inclusion policy) that every concrete request executor must honor
//! identically.
//!
//! Deliberately *not* here: connection management, field-level binary
//! framing, HTTP I/O, routing, retries. Those arrive through the narrow
//! collaborator seams — [`transport::Transport::perform`],
//! [`wire::KeyGenerator`], [`wire::ConflictResolver`], and
//! [`wire::CharsetRegistry`].

pub mod config;
pub mod errors;
pub mod models;
pub mod transport;
pub mod wire;

pub use config::{ClientConfig, ClientId};
pub use errors::{ClientError, ClientResult};
pub use models::{Content, Link, Object};
pub use transport::{Body, Request, Response, Transport};
pub use wire::{ConflictResolver, ContentCodec, KeyGenerator, ObjectMapper};
