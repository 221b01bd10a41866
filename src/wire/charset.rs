//! Character-encoding registry collaborator.
//!
//! The content codecs look wire charset labels up here. An unrecognized
//! label must never fail a decode; the payload simply stays opaque bytes.

/// Lookup from a wire charset label to a canonical encoding name.
pub trait CharsetRegistry {
    /// `Some(canonical)` when the label names an encoding this runtime
    /// understands, `None` otherwise.
    fn lookup(&self, label: &str) -> Option<&'static str>;
}

/// Registry of the encodings the store is seen emitting in practice.
///
/// Matching is case-insensitive and tolerant of the common alias spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCharsets;

impl CharsetRegistry for DefaultCharsets {
    fn lookup(&self, label: &str) -> Option<&'static str> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some("utf-8"),
            "us-ascii" | "ascii" | "ansi_x3.4-1968" => Some("us-ascii"),
            "iso-8859-1" | "latin1" | "latin-1" | "l1" => Some("iso-8859-1"),
            "utf-16" | "utf16" => Some("utf-16"),
            "utf-16be" => Some("utf-16be"),
            "utf-16le" => Some("utf-16le"),
            "windows-1252" | "cp1252" => Some("windows-1252"),
            _ => None,
        }
    }
}
