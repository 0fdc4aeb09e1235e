//! Sans-I/O parsers for the two response shapes mailcheck consumes.
//!
//! Both parsers operate on a complete buffer; partial or streaming input is
//! never seen here. Malformed lines are reported on the tracing layer and
//! skipped, so one bad record does not abort the rest of the response.

mod fetch;
mod search;

pub use fetch::parse_fetch_response;
pub use search::parse_search_response;
