//! # mailcheck
//!
//! Pipeline glue for the unseen-mail summary tool: drive the SEARCH and
//! FETCH parsers over completed response buffers, assemble and decode each
//! message's From and Subject, and print the summaries.
//!
//! The exchange with the mail store sits behind the [`Exchange`] trait;
//! connection setup, TLS, and authentication belong to its implementor.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod summary;

pub use summary::{Exchange, print_new_mail_summaries};
