use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while resolving node ids, parsing timestamps and decoding
/// snowflakes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid snowflake {input:?}: {source}")]
    InvalidIdentifier {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("node id unavailable: {0}")]
    NodeIdUnavailable(String),
    #[error("invalid timestamp {0:?}; expected milliseconds or an RFC 3339 timestamp")]
    InvalidTimestamp(String),
    #[error("timestamp {millis} ms is outside the representable range: {reason}")]
    TimestampOutOfRange { millis: i64, reason: String },
}

impl From<std::convert::Infallible> for Error {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}
