//! Charset transcoding to UTF-8.
//!
//! Thin adapter over the `charset` encoding tables. The header decoder
//! treats this as an external capability and degrades per field when it
//! fails.

use charset::Charset;

use crate::error::{Error, Result};

/// Transcodes `bytes` from the charset named by `label` into UTF-8 text.
///
/// Malformed sequences become replacement characters rather than errors;
/// partial output is still useful to someone reading a subject line.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] when no encoding matches `label`.
pub fn to_utf8(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Charset::for_label_no_replacement(label.as_bytes())
        .ok_or_else(|| Error::UnknownCharset(label.to_string()))?;

    let (text, malformed) = encoding.decode_without_bom_handling(bytes);
    if malformed {
        tracing::debug!(charset = label, "malformed sequence replaced during transcoding");
    }

    Ok(text.into_owned())
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

    #[test]
    fn utf8_passes_through() {
        assert_eq!(to_utf8("Café".as_bytes(), "UTF-8").unwrap(), "Café");
    }

    #[test]
    fn latin1_maps_high_bytes() {
        assert_eq!(to_utf8(b"Caf\xe9", "ISO-8859-1").unwrap(), "Café");
    }

    #[test]
    fn label_lookup_is_case_insensitive() {
        assert_eq!(to_utf8(b"hi", "utf-8").unwrap(), "hi");
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = to_utf8(b"hi", "x-no-such-charset").unwrap_err();
        assert!(matches!(err, Error::UnknownCharset(_)));
    }

    #[test]
    fn malformed_input_degrades_to_replacement() {
        let text = to_utf8(b"ok\xff\xfe", "UTF-8").unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.contains('\u{FFFD}'));
    }
}
