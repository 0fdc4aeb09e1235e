//! Error types for the response parsers.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing server responses.
///
/// Only unrecoverable shapes surface here; malformed lines the parsers can
/// skip past are reported on the tracing layer instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A literal marker declared more bytes than the response contains.
    ///
    /// Fatal for the parse: literal content is raw bytes, so there is no
    /// line boundary to resynchronize on past the marker.
    #[error("Truncated literal: declared {declared} bytes, only {available} available")]
    TruncatedLiteral {
        /// Byte count declared by the `{N}` marker.
        declared: usize,
        /// Bytes actually remaining in the buffer.
        available: usize,
    },

    /// A SEARCH response did not have the expected shape.
    #[error("Malformed SEARCH response: {0}")]
    MalformedSearch(String),
}
