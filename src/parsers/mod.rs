//! Parsers for the text printed by `digdag sessions`
//!
//! # Error Handling Strategy
//!
//! Decoding separates structure from content:
//!
//! - **Structural failures are fatal**: a session block with the wrong number of lines,
//!   a params field without valid JSON, or an unreadable session/created timestamp returns
//!   a [`ParseError`](crate::error::ParseError) and aborts the page. The CLI output is
//!   produced in one invocation, so a broken block means the whole page is suspect.
//!
//! - **Content drift is tolerated**: a line whose label is missing decodes to an empty
//!   string (or `0` for ids) instead of failing.

pub mod fields;
pub mod page;
pub mod timestamps;

pub use fields::{extract, extract_integer};
pub use page::decode_page;
pub use timestamps::parse_timestamp;
