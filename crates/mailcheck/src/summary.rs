//! Unseen-mail summary pipeline.

use std::io::{self, Write};

use mailcheck_imap::{parse_fetch_response, parse_search_response};
use mailcheck_mime::{SummaryHeaders, decode_header_value};

/// A completed request/response exchange with a mail store.
///
/// Implementations own connection setup, authentication, and command
/// dispatch. The pipeline only ever sees fully received response buffers;
/// it never consumes a partial stream.
pub trait Exchange {
    /// Raw response to a search for unseen messages.
    ///
    /// # Errors
    ///
    /// I/O failure talking to the store.
    fn search_unseen(&mut self) -> io::Result<Vec<u8>>;

    /// Raw response to a From/Subject header fetch for the comma-joined
    /// UID list.
    ///
    /// # Errors
    ///
    /// I/O failure talking to the store.
    fn fetch_headers(&mut self, uids: &str) -> io::Result<Vec<u8>>;
}

/// Prints one From line and one Subject line per unseen message, with a
/// blank line between messages and none after the last.
///
/// An empty search result skips the fetch entirely. Records the decoders
/// could not fully handle still print, in degraded form; diagnostics go to
/// the tracing layer, never to `out`.
///
/// # Errors
///
/// Returns an error on exchange or output I/O failure, on a malformed
/// SEARCH response, or when a literal overruns the fetch buffer.
pub fn print_new_mail_summaries<E, W>(exchange: &mut E, out: &mut W) -> anyhow::Result<()>
where
    E: Exchange,
    W: Write,
{
    let search = exchange.search_unseen()?;
    let uids = parse_search_response(&search)?;
    if uids.is_empty() {
        tracing::debug!("no unseen messages");
        return Ok(());
    }

    let fetch = exchange.fetch_headers(&uids.to_string())?;
    for (index, block) in parse_fetch_response(&fetch)?.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }

        let headers = SummaryHeaders::parse(&String::from_utf8_lossy(block));
        if headers.from().is_none() || headers.subject().is_none() {
            tracing::warn!(message = index + 1, "header block missing From or Subject");
        }

        writeln!(out, "{}", decode_header_value(headers.from().unwrap_or_default()))?;
        writeln!(
            out,
            "{}",
            decode_header_value(headers.subject().unwrap_or_default())
        )?;
    }

    Ok(())
}
