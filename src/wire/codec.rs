//! Strategy seam between the shared content model and its two encodings.

use crate::errors::ClientResult;
use crate::models::Content;

/// Encodes and decodes one content version against a concrete wire
/// representation.
///
/// The binary codec's representation is the typed message shape
/// [`WireContent`](crate::wire::message::WireContent); the HTTP codec's is
/// a header map plus body bytes. Both honor the same conditional-field and
/// charset-tolerance rules, so callers can swap strategies without
/// changing semantics.
pub trait ContentCodec {
    type Repr;

    fn encode(&self, content: &Content) -> ClientResult<Self::Repr>;

    fn decode(&self, repr: &Self::Repr) -> ClientResult<Content>;
}
