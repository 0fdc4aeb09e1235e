//! End-to-end pipeline tests over canned response buffers.

use std::io;

use mailcheck::{Exchange, print_new_mail_summaries};

/// Stands in for a live mail store: hands back canned buffers and records
/// which UID list the pipeline asked to fetch.
struct CannedExchange {
    search: Vec<u8>,
    fetch: Option<Vec<u8>>,
    fetched_uids: Option<String>,
}

impl Exchange for CannedExchange {
    fn search_unseen(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.search.clone())
    }

    fn fetch_headers(&mut self, uids: &str) -> io::Result<Vec<u8>> {
        self.fetched_uids = Some(uids.to_string());
        self.fetch
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unexpected fetch"))
    }
}

/// Frames one header block as a FETCH data line plus literal.
fn literal(content: &str) -> Vec<u8> {
    let mut buf = format!(
        "* 1 FETCH (BODY[HEADER.FIELDS (FROM SUBJECT)] {{{}}}\r\n",
        content.len()
    )
    .into_bytes();
    buf.extend_from_slice(content.as_bytes());
    buf.extend_from_slice(b"\r\n)\r\n");
    buf
}

#[test]
fn prints_decoded_summaries_with_separator() {
    let mut fetch = literal("From: A <a@x>\r\nSubject: Hi\r\n");
    fetch.extend_from_slice(&literal(
        "From: =?UTF-8?Q?Ren=C3=A9?= <r@x>\r\nSubject: =?UTF-8?Q?Caf=C3=A9?=\r\n",
    ));
    fetch.extend_from_slice(b"A2 OK Success\r\n");

    let mut exchange = CannedExchange {
        search: b"* SEARCH 3 7\r\n".to_vec(),
        fetch: Some(fetch),
        fetched_uids: None,
    };

    let mut out = Vec::new();
    print_new_mail_summaries(&mut exchange, &mut out).unwrap();

    assert_eq!(exchange.fetched_uids.as_deref(), Some("3,7"));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "A <a@x>\nHi\n\nRené <r@x>\nCafé\n"
    );
}

#[test]
fn empty_search_skips_fetch_entirely() {
    let mut exchange = CannedExchange {
        search: b"* SEARCH \r\n".to_vec(),
        fetch: None,
        fetched_uids: None,
    };

    let mut out = Vec::new();
    print_new_mail_summaries(&mut exchange, &mut out).unwrap();

    assert!(out.is_empty());
    assert!(exchange.fetched_uids.is_none());
}

#[test]
fn folded_subject_decodes_across_lines() {
    let mut fetch = literal("From: B <b@x>\r\nSubject: =?UTF-8?B?SGVs?=\r\n =?UTF-8?B?bG8=?=\r\n");
    fetch.extend_from_slice(b"A5 OK Success\r\n");

    let mut exchange = CannedExchange {
        search: b"* SEARCH 12\r\n".to_vec(),
        fetch: Some(fetch),
        fetched_uids: None,
    };

    let mut out = Vec::new();
    print_new_mail_summaries(&mut exchange, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "B <b@x>\nHello\n");
}

#[test]
fn malformed_search_response_is_an_error() {
    let mut exchange = CannedExchange {
        search: b"* OK nothing to see\r\n".to_vec(),
        fetch: None,
        fetched_uids: None,
    };

    let mut out = Vec::new();
    let result = print_new_mail_summaries(&mut exchange, &mut out);

    assert!(result.is_err());
    assert!(out.is_empty());
}

#[test]
fn message_missing_a_field_still_prints() {
    let mut fetch = literal("Subject: no sender\r\n");
    fetch.extend_from_slice(b"A9 OK Success\r\n");

    let mut exchange = CannedExchange {
        search: b"* SEARCH 4\r\n".to_vec(),
        fetch: Some(fetch),
        fetched_uids: None,
    };

    let mut out = Vec::new();
    print_new_mail_summaries(&mut exchange, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "\nno sender\n");
}
