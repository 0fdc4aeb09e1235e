//! RFC 2047 encoded-word scanning and decoding.
//!
//! An encoded word has the shape `=?charset?X?payload?=` with X selecting
//! Base64 or Quoted-Printable. The scanner locates well-formed tokens; the
//! decoder replaces them with decoded text, applying the folding-whitespace
//! rules of RFC 2047 §6.2 between adjacent words.

use crate::encoding::{decode_base64, decode_quoted_printable};
use crate::transcode;

/// Folding whitespace characters between header lines and encoded words.
const FWS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Characters RFC 2047 forbids in a charset name.
const CHARSET_SPECIALS: &[u8] = b"()<>@,;:\"/[]?.=";

/// Finds the next well-formed encoded word in `value`.
///
/// Returns the byte span `(start, end)` of the whole token, `end` pointing
/// past the closing `?=`, or `None` when no further token exists. An
/// opening `=?` without a well-formed remainder is skipped and the search
/// resumes after it, so a literal `=?` in ordinary text passes through
/// untouched.
#[must_use]
pub fn find_encoded_word(value: &str) -> Option<(usize, usize)> {
    let bytes = value.as_bytes();
    let mut search_from = 0;

    while let Some(found) = find_subslice(&bytes[search_from..], b"=?") {
        let start = search_from + found;
        let mut q = start + 2;
        while q < bytes.len() && is_charset_char(bytes[q]) {
            q += 1;
        }

        let header_ok = q > start + 2
            && bytes.get(q).copied() == Some(b'?')
            && matches!(bytes.get(q + 1).copied(), Some(b'B' | b'b' | b'Q' | b'q'))
            && bytes.get(q + 2).copied() == Some(b'?');

        if header_ok {
            q += 3;
            while q < bytes.len()
                && is_payload_char(bytes[q])
                && !(bytes[q] == b'?' && bytes.get(q + 1).copied() == Some(b'='))
            {
                q += 1;
            }
            if bytes.get(q).copied() == Some(b'?') && bytes.get(q + 1).copied() == Some(b'=') {
                return Some((start, q + 2));
            }
            q += 1;
        }

        search_from = q.min(bytes.len());
    }

    None
}

/// Decodes every encoded word in a header value, stitching the results
/// together with the surrounding plain text.
///
/// Whitespace-only gaps between adjacent encoded words vanish; a gap with
/// plain text in it keeps exactly one space at each word boundary that had
/// whitespace. Text before the first token is copied verbatim. A value
/// containing no encoded words is returned unchanged.
///
/// This never fails: a payload or charset the codecs reject is reported on
/// the tracing layer and the raw or partially decoded text is emitted in
/// its place.
#[must_use]
pub fn decode_header_value(value: &str) -> String {
    let mut out = String::new();
    let mut rest = value;
    let mut decoded_any = false;

    while let Some((start, end)) = find_encoded_word(rest) {
        let gap = &rest[..start];
        if decoded_any {
            append_gap(&mut out, gap);
        } else {
            out.push_str(gap);
        }
        out.push_str(&decode_word(&rest[start..end]));
        decoded_any = true;
        rest = &rest[end..];
    }

    if decoded_any {
        append_tail(&mut out, rest);
    } else {
        out.push_str(rest);
    }
    out
}

/// Emits the plain text between two encoded words.
fn append_gap(out: &mut String, gap: &str) {
    let after_leading = gap.trim_start_matches(FWS);
    if after_leading.is_empty() {
        // Folding whitespace between adjacent encoded words is not part of
        // the text (RFC 2047 §6.2).
        return;
    }
    if after_leading.len() != gap.len() {
        out.push(' ');
    }
    let text = after_leading.trim_end_matches(FWS);
    out.push_str(text);
    if text.len() != after_leading.len() {
        out.push(' ');
    }
}

/// Emits the plain text after the last encoded word.
fn append_tail(out: &mut String, tail: &str) {
    let text = tail.trim_start_matches(FWS);
    if text.is_empty() {
        return;
    }
    if text.len() != tail.len() {
        out.push(' ');
    }
    out.push_str(text);
}

/// Transfer encoding selected by the letter between the second and third
/// `?` of an encoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordEncoding {
    Base64,
    QuotedPrintable,
}

struct EncodedWord<'a> {
    charset: &'a str,
    encoding: WordEncoding,
    payload: &'a str,
}

/// Splits a scanner-approved token into its three parts.
fn split_encoded_word(token: &str) -> Option<EncodedWord<'_>> {
    let inner = token.strip_prefix("=?")?.strip_suffix("?=")?;
    let (charset, rest) = inner.split_once('?')?;
    let (letter, payload) = rest.split_once('?')?;
    let encoding = match letter {
        "B" | "b" => WordEncoding::Base64,
        "Q" | "q" => WordEncoding::QuotedPrintable,
        _ => return None,
    };
    Some(EncodedWord {
        charset,
        encoding,
        payload,
    })
}

/// Decodes one token, degrading to raw or lossy text on failure.
fn decode_word(token: &str) -> String {
    let Some(word) = split_encoded_word(token) else {
        tracing::warn!(token, "malformed encoded word passed through");
        return token.to_string();
    };

    let bytes = match word.encoding {
        WordEncoding::Base64 => match decode_base64(word.payload) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(%error, payload = word.payload, "Base64 payload rejected");
                return word.payload.to_string();
            }
        },
        WordEncoding::QuotedPrintable => decode_quoted_printable(word.payload),
    };

    match transcode::to_utf8(&bytes, word.charset) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(%error, charset = word.charset, "transcoding failed, using lossy UTF-8");
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

/// Charset names are graphic characters excluding the RFC 2047 specials.
fn is_charset_char(b: u8) -> bool {
    b.is_ascii_graphic() && !CHARSET_SPECIALS.contains(&b)
}

/// Payload bytes are printable ASCII, space included.
const fn is_payload_char(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
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
    use crate::encoding::encode_base64;

    #[test]
    fn finds_single_token_span() {
        let value = "Re: =?UTF-8?Q?Caf=C3=A9?= plans";
        let (start, end) = find_encoded_word(value).unwrap();
        assert_eq!(&value[start..end], "=?UTF-8?Q?Caf=C3=A9?=");
    }

    #[test]
    fn bare_open_marker_is_not_a_token() {
        assert_eq!(find_encoded_word("price =? 100"), None);
        assert_eq!(find_encoded_word("a =?b"), None);
    }

    #[test]
    fn invalid_encoding_letter_is_not_a_token() {
        assert_eq!(find_encoded_word("=?UTF-8?X?abc?="), None);
    }

    #[test]
    fn empty_charset_is_not_a_token() {
        assert_eq!(find_encoded_word("=??B?SGVsbG8=?="), None);
    }

    #[test]
    fn unterminated_token_resumes_after_marker() {
        // The first `=?` never closes; the real token after it must still
        // be found.
        let value = "x =?broken then =?UTF-8?B?SGk=?=";
        let (start, end) = find_encoded_word(value).unwrap();
        assert_eq!(&value[start..end], "=?UTF-8?B?SGk=?=");
    }

    #[test]
    fn decodes_quoted_printable_word() {
        assert_eq!(decode_header_value("=?UTF-8?Q?Caf=C3=A9?="), "Café");
    }

    #[test]
    fn decodes_base64_word() {
        assert_eq!(decode_header_value("=?UTF-8?B?SGVsbG8=?="), "Hello");
    }

    #[test]
    fn lowercase_encoding_letters_accepted() {
        assert_eq!(decode_header_value("=?UTF-8?q?Hi_there?="), "Hi there");
        assert_eq!(decode_header_value("=?UTF-8?b?SGk=?="), "Hi");
    }

    #[test]
    fn latin1_word_transcodes() {
        assert_eq!(decode_header_value("=?ISO-8859-1?Q?Caf=E9?="), "Café");
    }

    #[test]
    fn plain_value_is_unchanged() {
        let value = "A <a@x>";
        assert_eq!(decode_header_value(value), value);
        let with_marker = "50=? off";
        assert_eq!(decode_header_value(with_marker), with_marker);
    }

    #[test]
    fn adjacent_words_join_without_space() {
        let value = "=?UTF-8?B?SGVs?= =?UTF-8?B?bG8=?=";
        assert_eq!(decode_header_value(value), "Hello");
    }

    #[test]
    fn folded_words_join_without_space() {
        let value = "=?UTF-8?B?SGVs?=\r\n \t =?UTF-8?B?bG8=?=";
        assert_eq!(decode_header_value(value), "Hello");
    }

    #[test]
    fn words_around_plain_text_keep_single_spaces() {
        let value = "=?UTF-8?B?SGk=?=   and \t =?UTF-8?B?Ynll?=";
        assert_eq!(decode_header_value(value), "Hi and bye");
    }

    #[test]
    fn text_flush_against_words_gets_no_space() {
        let value = "=?UTF-8?Q?a?=x=?UTF-8?Q?b?=";
        assert_eq!(decode_header_value(value), "axb");
    }

    #[test]
    fn text_before_first_word_is_verbatim() {
        assert_eq!(
            decode_header_value("Re:  =?UTF-8?Q?ok?="),
            "Re:  ok"
        );
    }

    #[test]
    fn tail_whitespace_squeezes_to_one_space() {
        assert_eq!(
            decode_header_value("=?UTF-8?Q?Hi?= \r\n there"),
            "Hi there"
        );
    }

    #[test]
    fn whitespace_only_tail_is_dropped() {
        assert_eq!(decode_header_value("=?UTF-8?Q?Hi?= \r\n"), "Hi");
    }

    #[test]
    fn bad_base64_payload_passes_through_raw() {
        // 7 symbols, not a multiple of 4.
        assert_eq!(decode_header_value("=?UTF-8?B?SGVsbG8?="), "SGVsbG8");
    }

    #[test]
    fn unknown_charset_degrades_to_lossy_utf8() {
        assert_eq!(decode_header_value("=?x-no-such?Q?abc?="), "abc");
    }

    #[test]
    fn round_trips_base64_words() {
        let text = "Grüße aus Köln";
        let token = format!("=?UTF-8?B?{}?=", encode_base64(text.as_bytes()));
        assert_eq!(decode_header_value(&token), text);
    }
}
