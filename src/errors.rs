//! Error taxonomy for the wire-mapping and transport-contract layer.
//!
//! Validation errors are detected synchronously before any network
//! interaction. Decode errors come from malformed wire data. Everything
//! else is transparent plumbing from the `http` and `std::io` layers.

use http::StatusCode;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Raised by path validation when fewer than two segments are supplied
    /// and the single segment is not the map-reduce endpoint.
    #[error("resource path too short")]
    PathTooShort,

    /// Malformed wire data: a field the codec requires is missing or
    /// unparseable. The decode is abandoned, never partially repaired.
    #[error("malformed wire data: {0}")]
    Decode(String),

    /// A response code outside the expected set. Constructed by concrete
    /// executors from the [`valid`](crate::transport::valid) predicate;
    /// this layer never raises it itself.
    #[error("unexpected status code {actual} (expected one of {expected:?})")]
    UnexpectedStatus {
        expected: Vec<u16>,
        actual: StatusCode,
    },

    #[error(transparent)]
    InvalidUri(#[from] http::uri::InvalidUri),

    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error(transparent)]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// I/O failure while draining a streaming request body.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
