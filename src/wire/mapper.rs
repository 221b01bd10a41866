//! Object mapper: orchestrates the content codec across one-or-many
//! content versions, transcodes vector clocks between their textual and
//! raw forms, and hands sibling sets to the conflict-resolution policy.

use crate::errors::{ClientError, ClientResult};
use crate::models::Object;
use crate::wire::binary::BinaryContentCodec;
use crate::wire::codec::ContentCodec;
use crate::wire::message::{WireGetResponse, WirePutRequest};
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

/// Produces a key when an object is stored without one.
pub trait KeyGenerator {
    fn generate(&self) -> String;
}

/// Default key generator: random UUIDs, hyphen-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Policy applied to an object whose load produced sibling versions.
///
/// The resolver may collapse the siblings to one authoritative version or
/// return the conflicted object untouched; the mapper returns whatever it
/// yields.
pub trait ConflictResolver {
    fn resolve(&self, conflicted: Object) -> Object;
}

/// Default policy: no resolution, all siblings preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepSiblings;

impl ConflictResolver for KeepSiblings {
    fn resolve(&self, conflicted: Object) -> Object {
        conflicted
    }
}

/// Translates whole objects to put requests and get responses back into
/// objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectMapper<K = UuidKeys, R = KeepSiblings> {
    keygen: K,
    resolver: R,
    codec: BinaryContentCodec,
}

impl ObjectMapper {
    /// Mapper with UUID key generation and keep-all-siblings resolution.
    pub fn with_defaults() -> Self {
        Self::new(UuidKeys, KeepSiblings)
    }
}

impl<K: KeyGenerator, R: ConflictResolver> ObjectMapper<K, R> {
    pub fn new(keygen: K, resolver: R) -> Self {
        Self {
            keygen,
            resolver,
            codec: BinaryContentCodec::default(),
        }
    }

    /// Serialize `object` into a put request.
    ///
    /// Side effect: an object without a key is assigned one from the key
    /// generator, and keeps it, so the caller knows where the write went.
    /// A vector clock, when present, is transcoded from its base64 textual
    /// form to raw bytes.
    pub fn dump(&self, object: &mut Object) -> ClientResult<WirePutRequest> {
        let key = match &object.key {
            Some(key) => key.clone(),
            None => {
                let generated = self.keygen.generate();
                debug!(bucket = %object.bucket, key = %generated, "generated key for object");
                object.key = Some(generated.clone());
                generated
            }
        };

        let vclock = match &object.vclock {
            Some(text) => Some(Bytes::from(general_purpose::STANDARD.decode(text).map_err(
                |err| ClientError::Decode(format!("vector clock is not valid base64: {}", err)),
            )?)),
            None => None,
        };

        Ok(WirePutRequest {
            bucket: Bytes::copy_from_slice(object.bucket.as_bytes()),
            key: Bytes::copy_from_slice(key.as_bytes()),
            vclock,
            content: self.codec.encode(&object.content)?,
        })
    }

    /// Deserialize a get response onto `object`.
    ///
    /// One content entry loads directly onto the primary content. Two or
    /// more mark the object conflicted, materialize one sibling per entry
    /// (bucket, key, and vector clock inherited from the parent), and defer
    /// to the conflict resolver. A response with zero entries is malformed.
    pub fn load(&self, wire: &WireGetResponse, mut object: Object) -> ClientResult<Object> {
        if let Some(raw) = &wire.vclock {
            object.vclock = Some(general_purpose::STANDARD.encode(raw));
        }

        match wire.contents.as_slice() {
            [] => Err(ClientError::Decode(
                "get response carried no content entries".into(),
            )),
            [single] => {
                object.content = self.codec.decode(single)?;
                object.conflict = false;
                Ok(object)
            }
            many => {
                object.conflict = true;
                object.siblings = many
                    .iter()
                    .map(|wire_content| {
                        Ok(Object {
                            bucket: object.bucket.clone(),
                            key: object.key.clone(),
                            vclock: object.vclock.clone(),
                            content: self.codec.decode(wire_content)?,
                            conflict: false,
                            siblings: Vec::new(),
                        })
                    })
                    .collect::<ClientResult<_>>()?;
                debug!(
                    bucket = %object.bucket,
                    siblings = object.siblings.len(),
                    "conflicting sibling versions returned"
                );
                Ok(self.resolver.resolve(object))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Content;
    use crate::wire::message::WireContent;

    fn wire_content(body: &'static [u8]) -> WireContent {
        WireContent {
            value: Bytes::from_static(body),
            content_type: Bytes::from_static(b"text/plain"),
            ..Default::default()
        }
    }

    #[test]
    fn dump_assigns_a_generated_key_and_keeps_it() {
        struct FixedKeys;
        impl KeyGenerator for FixedKeys {
            fn generate(&self) -> String {
                "generated-1".into()
            }
        }

        let mapper = ObjectMapper::new(FixedKeys, KeepSiblings);
        let mut object = Object::new("people");
        object.content = Content::new("body");

        let request = mapper.dump(&mut object).unwrap();
        assert_eq!(object.key.as_deref(), Some("generated-1"));
        assert_eq!(request.key, Bytes::from_static(b"generated-1"));
    }

    #[test]
    fn dump_transcodes_the_vector_clock_to_raw_bytes() {
        let mapper = ObjectMapper::with_defaults();
        let mut object = Object::with_key("people", "carol");
        object.vclock = Some(general_purpose::STANDARD.encode(b"opaque-clock"));

        let request = mapper.dump(&mut object).unwrap();
        assert_eq!(request.vclock, Some(Bytes::from_static(b"opaque-clock")));

        object.vclock = Some("not!base64!".into());
        assert!(matches!(
            mapper.dump(&mut object),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn single_content_entry_loads_without_conflict() {
        let mapper = ObjectMapper::with_defaults();
        let wire = WireGetResponse {
            vclock: Some(Bytes::from_static(b"ck")),
            contents: vec![wire_content(b"only")],
        };

        let loaded = mapper.load(&wire, Object::with_key("people", "carol")).unwrap();
        assert!(!loaded.conflict);
        assert!(loaded.siblings.is_empty());
        assert_eq!(loaded.content.value, Bytes::from_static(b"only"));
        assert_eq!(loaded.vclock, Some(general_purpose::STANDARD.encode(b"ck")));
    }

    #[test]
    fn multiple_entries_become_siblings_sharing_the_vclock() {
        let mapper = ObjectMapper::with_defaults();
        let wire = WireGetResponse {
            vclock: Some(Bytes::from_static(b"ck")),
            contents: vec![wire_content(b"a"), wire_content(b"b"), wire_content(b"c")],
        };

        let loaded = mapper.load(&wire, Object::with_key("people", "carol")).unwrap();
        assert!(loaded.conflict);
        assert_eq!(loaded.siblings.len(), 3);
        for sibling in &loaded.siblings {
            assert_eq!(sibling.vclock, loaded.vclock);
            assert_eq!(sibling.bucket, "people");
            assert!(!sibling.conflict);
        }
    }

    #[test]
    fn resolver_decides_what_a_conflicted_load_returns() {
        struct FirstWins;
        impl ConflictResolver for FirstWins {
            fn resolve(&self, conflicted: Object) -> Object {
                let mut chosen = conflicted.siblings.into_iter().next().unwrap();
                chosen.vclock = conflicted.vclock;
                chosen
            }
        }

        let mapper = ObjectMapper::new(UuidKeys, FirstWins);
        let wire = WireGetResponse {
            vclock: None,
            contents: vec![wire_content(b"first"), wire_content(b"second")],
        };

        let resolved = mapper.load(&wire, Object::with_key("people", "carol")).unwrap();
        assert!(!resolved.conflict);
        assert_eq!(resolved.content.value, Bytes::from_static(b"first"));
    }

    #[test]
    fn zero_content_entries_is_a_decode_error() {
        let mapper = ObjectMapper::with_defaults();
        let wire = WireGetResponse::default();
        assert!(matches!(
            mapper.load(&wire, Object::new("people")),
            Err(ClientError::Decode(_))
        ));
    }
}
