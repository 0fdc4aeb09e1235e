//! Byte-transform codecs for encoded-word payloads.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encodes data as Base64 with the standard alphabet.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes a Base64 encoded-word payload.
///
/// Encoded-word payloads are unbroken runs of 4-symbol groups, so the
/// length is checked up front.
///
/// # Errors
///
/// Returns [`Error::Base64Length`] when the payload length is not a
/// multiple of 4, or [`Error::Base64Decode`] for symbols outside the
/// alphabet.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    if data.len() % 4 != 0 {
        return Err(Error::Base64Length(data.len()));
    }
    STANDARD.decode(data).map_err(Into::into)
}

/// Decodes a Quoted-Printable encoded-word payload into raw bytes.
///
/// Per RFC 2047, `_` stands for space and `=XY` (two hex digits) for the
/// byte 0xXY. Decoding is lenient: a `=` not followed by two hex digits is
/// copied literally, as is any other byte. Charset transcoding happens on
/// the returned bytes, so no text decoding is attempted here.
#[must_use]
pub fn decode_quoted_printable(data: &str) -> Vec<u8> {
    let bytes = data.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                out.push(b' ');
                i += 1;
            }
            b'=' => {
                if let (Some(hi), Some(lo)) = (
                    bytes.get(i + 1).copied().and_then(hex_val),
                    bytes.get(i + 2).copied().and_then(hex_val),
                ) {
                    out.push((hi << 4) | lo);
                    i += 3;
                } else {
                    out.push(b'=');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}

/// Maps an ASCII hex digit to its value, `None` for anything else.
const fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base64_round_trip() {
        let data = b"Hello, World";
        let encoded = encode_base64(data);
        assert_eq!(decode_base64(&encoded).unwrap(), data);
    }

    #[test]
    fn base64_rejects_bad_length() {
        let err = decode_base64("SGVsbG8").unwrap_err();
        assert!(matches!(err, Error::Base64Length(7)));
    }

    #[test]
    fn base64_rejects_bad_symbol() {
        let err = decode_base64("SGV#").unwrap_err();
        assert!(matches!(err, Error::Base64Decode(_)));
    }

    #[test]
    fn quoted_printable_hex_escape() {
        assert_eq!(decode_quoted_printable("Caf=C3=A9"), b"Caf\xc3\xa9");
    }

    #[test]
    fn quoted_printable_underscore_is_space() {
        assert_eq!(decode_quoted_printable("Hello_World"), b"Hello World");
    }

    #[test]
    fn quoted_printable_lowercase_hex() {
        assert_eq!(decode_quoted_printable("=c3=a9"), b"\xc3\xa9");
    }

    #[test]
    fn quoted_printable_bare_equals_is_literal() {
        assert_eq!(decode_quoted_printable("a=b"), b"a=b");
        assert_eq!(decode_quoted_printable("tail="), b"tail=");
        assert_eq!(decode_quoted_printable("=G1"), b"=G1");
    }

    #[test]
    fn hex_val_maps_both_cases() {
        assert_eq!(hex_val(b'0'), Some(0));
        assert_eq!(hex_val(b'9'), Some(9));
        assert_eq!(hex_val(b'a'), Some(10));
        assert_eq!(hex_val(b'F'), Some(15));
        assert_eq!(hex_val(b'g'), None);
        assert_eq!(hex_val(b' '), None);
    }

    proptest! {
        // Unpadded round trip: encoded words in the wild carry payloads
        // whose decoded length is a whole number of 3-byte groups.
        #[test]
        fn base64_round_trips_whole_groups(data in proptest::collection::vec(any::<u8>(), 0..48)) {
            let whole = &data[..data.len() - data.len() % 3];
            let encoded = encode_base64(whole);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert!(!encoded.ends_with('='));
            prop_assert_eq!(decode_base64(&encoded).unwrap(), whole);
        }

        #[test]
        fn quoted_printable_is_identity_without_escapes(s in "[ -<>-^`-~]*") {
            prop_assert_eq!(decode_quoted_printable(&s), s.as_bytes());
        }
    }
}
