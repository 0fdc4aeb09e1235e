//! Header-FETCH response parsing.
//!
//! The response interleaves CRLF-delimited status lines with length-prefixed
//! literals, one literal per fetched message. Only the literals matter to
//! the pipeline; the tagged acknowledgment is ignored and any other line is
//! reported and skipped.

use crate::{Error, Result};

/// Bytes following each literal on the wire: the literal's closing CRLF,
/// then a `)` line of its own.
const LITERAL_TRAILER: &[u8] = b"\r\n)\r\n";

/// Extracts every `{N}`-prefixed literal from a complete FETCH response.
///
/// Literals are returned in encounter order, one `Vec<u8>` per message
/// header block, each containing exactly the N bytes the marker declared
/// (embedded CR/LF included). An empty buffer yields an empty vector.
///
/// # Errors
///
/// Returns [`Error::TruncatedLiteral`] if a marker declares more bytes than
/// the buffer holds.
pub fn parse_fetch_response(input: &[u8]) -> Result<Vec<Vec<u8>>> {
    FetchParser::new(input).run()
}

/// Cursor over a raw FETCH response buffer.
struct FetchParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> FetchParser<'a> {
    const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn run(mut self) -> Result<Vec<Vec<u8>>> {
        let mut literals = Vec::new();

        while self.pos < self.input.len() {
            let line = self.read_line();
            if let Some(declared) = literal_len(line) {
                literals.push(self.read_literal(declared)?);
            } else if !is_tagged_ok(line) {
                tracing::warn!(
                    line = %String::from_utf8_lossy(line),
                    "skipping unrecognized response line"
                );
            }
        }

        Ok(literals)
    }

    /// Reads one line, consuming its CRLF (or the rest of the buffer at EOF).
    fn read_line(&mut self) -> &'a [u8] {
        let rest = &self.input[self.pos..];
        match rest.windows(2).position(|w| w == b"\r\n") {
            Some(i) => {
                self.pos += i + 2;
                &rest[..i]
            }
            None => {
                self.pos = self.input.len();
                rest
            }
        }
    }

    /// Reads exactly `declared` bytes of literal content, then consumes the
    /// 5-byte trailer. A missing trailer is reported; the line scanner
    /// resynchronizes on the next CRLF.
    fn read_literal(&mut self, declared: usize) -> Result<Vec<u8>> {
        let available = self.input.len() - self.pos;
        if declared > available {
            return Err(Error::TruncatedLiteral {
                declared,
                available,
            });
        }

        let content = self.input[self.pos..self.pos + declared].to_vec();
        self.pos += declared;

        if self.input[self.pos..].starts_with(LITERAL_TRAILER) {
            self.pos += LITERAL_TRAILER.len();
        } else {
            tracing::warn!(position = self.pos, "literal missing its `)` trailer");
        }

        Ok(content)
    }
}

/// Returns the byte count from a trailing `{N}` marker, if the line carries
/// one. The last `{` on the line starts the marker.
fn literal_len(line: &[u8]) -> Option<usize> {
    if !line.ends_with(b"}") {
        return None;
    }
    let open = line.iter().rposition(|&b| b == b'{')?;
    let digits = &line[open + 1..line.len() - 1];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// Matches the tagged acknowledgment shape `A<digits> OK ...`.
fn is_tagged_ok(line: &[u8]) -> bool {
    let Some(rest) = line.strip_prefix(b"A") else {
        return false;
    };
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && rest[digits..].starts_with(b" OK")
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

    fn framed(content: &[u8]) -> Vec<u8> {
        let mut buf =
            format!("* 1 FETCH (BODY[HEADER.FIELDS (FROM SUBJECT)] {{{}}}\r\n", content.len())
                .into_bytes();
        buf.extend_from_slice(content);
        buf.extend_from_slice(b"\r\n)\r\n");
        buf
    }

    #[test]
    fn extracts_single_literal() {
        let mut response = framed(b"From: A <a@x>\r\nSubject: Hi\r\n");
        response.extend_from_slice(b"A3 OK Success\r\n");

        let literals = parse_fetch_response(&response).unwrap();
        assert_eq!(literals, vec![b"From: A <a@x>\r\nSubject: Hi\r\n".to_vec()]);
    }

    #[test]
    fn extracts_literals_in_encounter_order() {
        let mut response = framed(b"Subject: first\r\n");
        response.extend_from_slice(&framed(b"Subject: second\r\n"));
        response.extend_from_slice(b"A7 OK Success\r\n");

        let literals = parse_fetch_response(&response).unwrap();
        assert_eq!(literals.len(), 2);
        assert_eq!(literals[0], b"Subject: first\r\n");
        assert_eq!(literals[1], b"Subject: second\r\n");
    }

    #[test]
    fn zero_length_literal_is_valid() {
        let literals = parse_fetch_response(&framed(b"")).unwrap();
        assert_eq!(literals, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn empty_response_yields_no_literals() {
        let literals = parse_fetch_response(b"").unwrap();
        assert!(literals.is_empty());
    }

    #[test]
    fn literal_content_may_embed_crlf() {
        let content = b"From: A\r\nSubject: line one\r\n continued\r\n";
        let literals = parse_fetch_response(&framed(content)).unwrap();
        assert_eq!(literals, vec![content.to_vec()]);
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let mut response = b"* 12 EXISTS\r\n".to_vec();
        response.extend_from_slice(&framed(b"Subject: still parsed\r\n"));
        response.extend_from_slice(b"A1 OK Success\r\n");

        let literals = parse_fetch_response(&response).unwrap();
        assert_eq!(literals, vec![b"Subject: still parsed\r\n".to_vec()]);
    }

    #[test]
    fn truncated_literal_is_fatal() {
        let response = b"* 1 FETCH (BODY[] {100}\r\nshort";
        let err = parse_fetch_response(response).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedLiteral {
                declared: 100,
                ..
            }
        ));
    }

    #[test]
    fn marker_uses_last_brace_on_line() {
        // The attribute list also contains braces-free parens; the size
        // marker is always the trailing {N}.
        let line = b"* 1 FETCH (BODY[HEADER.FIELDS (FROM SUBJECT)] {28}";
        assert_eq!(literal_len(line), Some(28));
    }

    #[test]
    fn non_marker_lines_have_no_length() {
        assert_eq!(literal_len(b"A1 OK Success"), None);
        assert_eq!(literal_len(b"* 1 FETCH (FLAGS (\\Seen))"), None);
        assert_eq!(literal_len(b"* 1 FETCH {x}"), None);
        assert_eq!(literal_len(b"* 1 FETCH {}"), None);
    }

    #[test]
    fn tagged_ok_shapes() {
        assert!(is_tagged_ok(b"A3 OK Success"));
        assert!(is_tagged_ok(b"A142 OK FETCH completed"));
        assert!(!is_tagged_ok(b"A OK missing digits"));
        assert!(!is_tagged_ok(b"B3 OK wrong prefix"));
        assert!(!is_tagged_ok(b"A3 NO denied"));
    }

    proptest! {
        #[test]
        fn literal_extraction_is_exact(content in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut response = framed(&content);
            response.extend_from_slice(b"A1 OK Success\r\n");

            let literals = parse_fetch_response(&response).unwrap();
            prop_assert_eq!(literals, vec![content]);
        }
    }
}
