//! Command-line entry point.
//!
//! The network exchange is out of scope for this tool, so the binary
//! replays captured response buffers: one `* SEARCH` response and the
//! header-FETCH response it led to.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use mailcheck::{Exchange, print_new_mail_summaries};

/// Print From/Subject summaries of unseen mail from captured IMAP
/// responses.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File holding the raw `* SEARCH` response.
    search: PathBuf,

    /// File holding the raw header-FETCH response; required whenever the
    /// search reported any unseen messages.
    fetch: Option<PathBuf>,
}

/// Replays captured response buffers in place of a live connection.
struct ReplayExchange {
    search: PathBuf,
    fetch: Option<PathBuf>,
}

impl Exchange for ReplayExchange {
    fn search_unseen(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.search)
    }

    fn fetch_headers(&mut self, uids: &str) -> io::Result<Vec<u8>> {
        tracing::debug!(uids, "replaying header fetch");
        let path = self.fetch.as_ref().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "search reported unseen messages but no fetch capture was given",
            )
        })?;
        fs::read(path)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut exchange = ReplayExchange {
        search: args.search,
        fetch: args.fetch,
    };

    let mut stdout = io::stdout().lock();
    print_new_mail_summaries(&mut exchange, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
