//! # mailcheck-imap
//!
//! Sans-I/O parsers for the two IMAP response shapes the mailcheck pipeline
//! consumes: the single-line `* SEARCH` UID listing and the header-FETCH
//! response with its length-prefixed literals.
//!
//! Both entry points take a complete, already-received buffer. Connection
//! management, TLS, and command dispatch are the caller's concern; nothing
//! here blocks or retries.
//!
//! ```
//! use mailcheck_imap::{parse_fetch_response, parse_search_response};
//!
//! let uids = parse_search_response(b"* SEARCH 3 7 9\r\n")?;
//! assert_eq!(uids.to_string(), "3,7,9");
//!
//! let response = b"* 1 FETCH (BODY[HEADER.FIELDS (FROM SUBJECT)] {13}\r\n\
//!                  Subject: Hi\r\n\
//!                  \r\n)\r\n\
//!                  A2 OK Success\r\n";
//! let blocks = parse_fetch_response(response)?;
//! assert_eq!(blocks, vec![b"Subject: Hi\r\n".to_vec()]);
//! # Ok::<(), mailcheck_imap::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use parser::{parse_fetch_response, parse_search_response};
pub use types::{Uid, UidSet};
