//! Header-field assembly for one message's raw header block.

/// Raw From and Subject values pulled from one fetched header block.
///
/// Values are the accumulated raw strings, continuation lines included;
/// RFC 2047 decoding happens afterwards, on the assembled value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryHeaders {
    from: Option<String>,
    subject: Option<String>,
}

enum FieldName {
    From,
    Subject,
}

impl SummaryHeaders {
    /// Assembles the recognized fields from a CRLF-delimited header block.
    ///
    /// `From: ` and `Subject: ` (exact, case-sensitive) open a field; every
    /// following line up to the next recognized field start is appended
    /// verbatim, leading whitespace and all, reproducing the folded value.
    /// A line arriving before any field has opened is reported and skipped.
    /// A repeated field name replaces the earlier value.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let mut headers = Self::default();
        let mut current: Option<(FieldName, String)> = None;

        for line in block.split("\r\n").filter(|line| !line.is_empty()) {
            if let Some(value) = line.strip_prefix("From: ") {
                headers.commit(current.take());
                current = Some((FieldName::From, value.to_string()));
            } else if let Some(value) = line.strip_prefix("Subject: ") {
                headers.commit(current.take());
                current = Some((FieldName::Subject, value.to_string()));
            } else if let Some((_, value)) = current.as_mut() {
                value.push_str(line);
            } else {
                tracing::warn!(line, "continuation line before any header field");
            }
        }

        headers.commit(current);
        headers
    }

    fn commit(&mut self, field: Option<(FieldName, String)>) {
        match field {
            Some((FieldName::From, value)) => self.from = Some(value),
            Some((FieldName::Subject, value)) => self.subject = Some(value),
            None => {}
        }
    }

    /// Raw From value, if the block had one.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Raw Subject value, if the block had one.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
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

    #[test]
    fn parses_plain_fields() {
        let headers = SummaryHeaders::parse("From: A <a@x>\r\nSubject: Hi\r\n");
        assert_eq!(headers.from(), Some("A <a@x>"));
        assert_eq!(headers.subject(), Some("Hi"));
    }

    #[test]
    fn field_order_does_not_matter() {
        let headers = SummaryHeaders::parse("Subject: Hi\r\nFrom: A <a@x>\r\n");
        assert_eq!(headers.from(), Some("A <a@x>"));
        assert_eq!(headers.subject(), Some("Hi"));
    }

    #[test]
    fn continuation_lines_append_verbatim() {
        // Folded continuations carry their own leading whitespace; no
        // separator is inserted.
        let headers = SummaryHeaders::parse(
            "Subject: =?UTF-8?B?SGVs?=\r\n =?UTF-8?B?bG8=?=\r\nFrom: A <a@x>\r\n",
        );
        assert_eq!(
            headers.subject(),
            Some("=?UTF-8?B?SGVs?= =?UTF-8?B?bG8=?=")
        );
        assert_eq!(headers.from(), Some("A <a@x>"));
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let headers = SummaryHeaders::parse("FROM: A <a@x>\r\nSubject: Hi\r\n");
        assert_eq!(headers.from(), None);
        assert_eq!(headers.subject(), Some("Hi"));
    }

    #[test]
    fn unrecognized_header_joins_open_field() {
        // Only From and Subject are recognized; anything else folds into
        // whichever field is open.
        let headers =
            SummaryHeaders::parse("From: A <a@x>\r\nDate: today\r\nSubject: Hi\r\n");
        assert_eq!(headers.from(), Some("A <a@x>Date: today"));
        assert_eq!(headers.subject(), Some("Hi"));
    }

    #[test]
    fn leading_orphan_line_is_skipped_not_fatal() {
        let headers = SummaryHeaders::parse(" orphan\r\nFrom: A <a@x>\r\nSubject: Hi\r\n");
        assert_eq!(headers.from(), Some("A <a@x>"));
        assert_eq!(headers.subject(), Some("Hi"));
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let headers = SummaryHeaders::parse("Subject: first\r\nSubject: second\r\n");
        assert_eq!(headers.subject(), Some("second"));
    }

    #[test]
    fn empty_block_has_no_fields() {
        let headers = SummaryHeaders::parse("");
        assert_eq!(headers.from(), None);
        assert_eq!(headers.subject(), None);
    }

    #[test]
    fn trailing_blank_line_is_ignored() {
        let headers = SummaryHeaders::parse("From: A <a@x>\r\nSubject: Hi\r\n\r\n");
        assert_eq!(headers.from(), Some("A <a@x>"));
        assert_eq!(headers.subject(), Some("Hi"));
    }
}
