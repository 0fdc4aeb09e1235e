//! `* SEARCH` response parsing.

use crate::types::{Uid, UidSet};
use crate::{Error, Result};

const SEARCH_PREFIX: &str = "* SEARCH";

/// Parses a single-line `* SEARCH <id> <id> ...` response into a [`UidSet`].
///
/// An empty result (`* SEARCH\r\n`, with or without a trailing space) yields
/// an empty set; callers must skip the follow-up fetch in that case.
///
/// # Errors
///
/// Returns [`Error::MalformedSearch`] if the fixed prefix is missing or an
/// identifier is not a positive decimal number.
pub fn parse_search_response(input: &[u8]) -> Result<UidSet> {
    let text = std::str::from_utf8(input)
        .map_err(|e| Error::MalformedSearch(format!("response is not valid UTF-8: {e}")))?;

    let Some(ids) = text.strip_prefix(SEARCH_PREFIX) else {
        return Err(Error::MalformedSearch(format!(
            "expected `{SEARCH_PREFIX}`, got {:?}",
            text.lines().next().unwrap_or_default()
        )));
    };

    ids.trim_end_matches(['\r', '\n'])
        .split_ascii_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .ok()
                .and_then(Uid::new)
                .ok_or_else(|| Error::MalformedSearch(format!("bad UID {token:?}")))
        })
        .collect()
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
    fn parses_uid_list() {
        let uids = parse_search_response(b"* SEARCH 3 7 9\r\n").unwrap();
        assert_eq!(uids.to_string(), "3,7,9");
    }

    #[test]
    fn empty_result_with_trailing_space() {
        let uids = parse_search_response(b"* SEARCH \r\n").unwrap();
        assert!(uids.is_empty());
        assert_eq!(uids.to_string(), "");
    }

    #[test]
    fn empty_result_without_trailing_space() {
        let uids = parse_search_response(b"* SEARCH\r\n").unwrap();
        assert!(uids.is_empty());
    }

    #[test]
    fn missing_prefix_is_an_error() {
        let err = parse_search_response(b"* OK still here\r\n").unwrap_err();
        assert!(matches!(err, Error::MalformedSearch(_)));
    }

    #[test]
    fn non_numeric_uid_is_an_error() {
        let err = parse_search_response(b"* SEARCH 3 seven\r\n").unwrap_err();
        assert!(matches!(err, Error::MalformedSearch(_)));
    }

    #[test]
    fn zero_uid_is_an_error() {
        let err = parse_search_response(b"* SEARCH 0\r\n").unwrap_err();
        assert!(matches!(err, Error::MalformedSearch(_)));
    }

    #[test]
    fn single_uid() {
        let uids = parse_search_response(b"* SEARCH 42\r\n").unwrap();
        assert_eq!(uids.len(), 1);
        assert_eq!(uids.to_string(), "42");
    }
}
