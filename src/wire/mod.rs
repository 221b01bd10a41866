//! Wire-format mapping between the in-memory object model and the two
//! encodings the store speaks: a compact binary message format and an
//! HTTP/MIME representation.
//!
//! Both encodings share one logical Content/Link/Pair model; the
//! [`ContentCodec`] trait captures the strategy seam, with
//! [`BinaryContentCodec`] and [`HttpContentCodec`] as the two
//! implementations. Field-level framing of the binary messages
//! (varint/length-prefix) is the connection layer's job, not ours — this
//! module stops at the typed message shapes in [`message`].

pub mod binary;
pub mod charset;
pub mod codec;
pub mod http;
pub mod mapper;
pub mod message;

pub use binary::BinaryContentCodec;
pub use charset::{CharsetRegistry, DefaultCharsets};
pub use codec::ContentCodec;
pub use http::HttpContentCodec;
pub use mapper::{ConflictResolver, KeepSiblings, KeyGenerator, ObjectMapper, UuidKeys};
pub use message::{WireContent, WireGetResponse, WireLink, WirePair, WirePutRequest};
