//! digdag sessions - Find failed workflow sessions through the digdag CLI
//!
//! This library drives `digdag sessions` and turns its text output into typed
//! session records. It supports:
//!
//! - Decoding the `label: value` session blocks printed by the CLI
//! - Detecting retried sessions from their scheduling params
//! - Paging backwards through session history until a cutoff time
//! - Filtering and rendering sessions by outcome
//!
//! # Example
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use digdag_sessions::{DigdagCli, SessionFetcher, SessionQuery, render};
//!
//! let query = SessionQuery::new("sales", "daily_report").with_endpoint("http://localhost:65432");
//! let fetcher = SessionFetcher::new(DigdagCli::default(), query);
//! let cutoff = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
//! for line in render(&fetcher.failed_sessions_until(cutoff)?) {
//!     println!("{}", line);
//! }
//! # Ok::<(), digdag_sessions::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parsers;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use error::{Error, FetchError, InvocationError, ParseError, Result};
pub use fetcher::{Pages, SessionFetcher};
pub use models::{SessionParams, SessionRecord};
pub use parsers::decode_page;
pub use report::{Outcome, filter_by_outcome, filter_failed, render, render_json};
pub use runner::{DigdagCli, QueryRunner, SessionQuery};
