//! Error types for header decoding.

use thiserror::Error;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Decode error types.
///
/// All of these are non-fatal at the header level: the decoder reports them
/// and falls back to the raw or partially decoded text.
#[derive(Debug, Error)]
pub enum Error {
    /// Base64 payload length is not a multiple of 4.
    #[error("Base64 payload length {0} is not a multiple of 4")]
    Base64Length(usize),

    /// Base64 payload contains a symbol outside the alphabet.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// The transcoder does not know the charset label.
    #[error("Unknown charset: {0}")]
    UnknownCharset(String),
}
