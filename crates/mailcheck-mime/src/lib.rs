//! # mailcheck-mime
//!
//! Decoding for internationalized mail headers: RFC 2047 encoded words,
//! the Base64/Quoted-Printable payload codecs behind them, charset
//! transcoding to UTF-8, and assembly of folded From/Subject fields from a
//! raw header block.
//!
//! Decoding degrades rather than fails: malformed records are reported on
//! the tracing layer and the nearest usable text is produced, so one bad
//! encoded word never costs a whole message.
//!
//! ```
//! use mailcheck_mime::{SummaryHeaders, decode_header_value};
//!
//! let headers =
//!     SummaryHeaders::parse("From: A <a@x>\r\nSubject: =?UTF-8?Q?Caf=C3=A9?=\r\n");
//! assert_eq!(headers.from(), Some("A <a@x>"));
//! assert_eq!(decode_header_value(headers.subject().unwrap_or_default()), "Café");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod encoded_word;
mod encoding;
mod error;
mod header;
mod transcode;

pub use encoded_word::{decode_header_value, find_encoded_word};
pub use encoding::{decode_base64, decode_quoted_printable, encode_base64};
pub use error::{Error, Result};
pub use header::SummaryHeaders;
pub use transcode::to_utf8;
