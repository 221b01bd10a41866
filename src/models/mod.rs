//! In-memory object model for the Cirrus key-value store.
//!
//! These types are the application-facing representation that the wire
//! codecs translate to and from the binary message and HTTP/MIME
//! encodings. They serialize naturally as JSON via `serde`.

pub mod content;
pub mod link;
pub mod object;

pub use content::Content;
pub use link::Link;
pub use object::Object;
