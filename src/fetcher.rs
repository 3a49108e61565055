//! Backward pagination over `digdag sessions`.
//!
//! The CLI lists the most recent sessions first and accepts the id of a
//! session to continue from older ones. [`SessionFetcher::fetch_until`] keeps
//! requesting older pages until the oldest session it holds was scheduled at
//! or before the cutoff, so it issues the fewest invocations that cover the
//! requested window.
//!
//! # Error Handling Strategy
//!
//! Unlike the page parsers there is no graceful degradation here: a failed
//! invocation, an undecodable page, or an empty page aborts the fetch and no
//! partial result is returned. Nothing is retried.

use chrono::{DateTime, Utc};

use crate::error::{FetchError, Result};
use crate::models::SessionRecord;
use crate::parsers::decode_page;
use crate::report::filter_failed;
use crate::runner::{QueryRunner, SessionQuery};

pub struct SessionFetcher<R> {
    runner: R,
    query: SessionQuery,
}

impl<R: QueryRunner> SessionFetcher<R> {
    pub fn new(runner: R, query: SessionQuery) -> Self {
        Self { runner, query }
    }

    /// Fetch and decode a single page, reversed from the order the CLI printed it
    ///
    /// `cursor` is the id of the session to continue from; `None` requests the
    /// most recent page. An empty page is an error because pagination cannot
    /// continue without a record to take the next cursor from.
    pub fn fetch_page(&self, cursor: Option<i64>) -> Result<Vec<SessionRecord>> {
        let raw = self.runner.run_query(&self.query, cursor)?;
        let mut page = decode_page(&raw)?;

        if page.is_empty() {
            return Err(match cursor {
                None => FetchError::EmptyFirstPage,
                Some(cursor) => FetchError::EmptyPage { cursor },
            }
            .into());
        }

        page.reverse();
        Ok(page)
    }

    /// Lazily fetch pages from the most recent one backwards
    ///
    /// Each page is fetched only when the iterator is advanced. The iterator
    /// ends after yielding the first error.
    pub fn pages(&self) -> Pages<'_, R> {
        Pages { fetcher: self, cursor: None, done: false }
    }

    /// Fetch sessions until the oldest one held is at or before `cutoff`
    ///
    /// Pages are appended in the order they were fetched, each one reversed;
    /// the list is neither re-sorted nor deduplicated. The last page usually
    /// contains sessions older than `cutoff`, which are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if any invocation fails, a page cannot be decoded, or a
    /// page comes back empty.
    pub fn fetch_until(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionRecord>> {
        let mut sessions = Vec::new();

        for page in self.pages() {
            let page = page?;
            let oldest_time = oldest_in_page(&page).map(|session| session.session_time);
            tracing::debug!(
                records = page.len(),
                oldest = ?oldest_time,
                cutoff = %cutoff,
                "Fetched page of sessions"
            );

            sessions.extend(page);
            if oldest_time.is_none_or(|time| time <= cutoff) {
                break;
            }
        }

        Ok(sessions)
    }

    /// Sessions with status `error` among those fetched by [`Self::fetch_until`]
    pub fn failed_sessions_until(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionRecord>> {
        Ok(filter_failed(self.fetch_until(cutoff)?))
    }
}

/// Iterator over pages of sessions, most recent page first
///
/// Holds the pagination state: the cursor for the next request and whether
/// iteration stopped on an error.
pub struct Pages<'a, R> {
    fetcher: &'a SessionFetcher<R>,
    cursor: Option<i64>,
    done: bool,
}

impl<R> Pages<'_, R> {
    /// Session id the next request will continue from
    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }
}

impl<R: QueryRunner> Iterator for Pages<'_, R> {
    type Item = Result<Vec<SessionRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.fetcher.fetch_page(self.cursor) {
            Ok(page) => {
                self.cursor = oldest_in_page(&page).map(|session| session.id);
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Earliest scheduled session of a reversed page
///
/// With the CLI's ordering this is the last record; on equal session times
/// the later record wins.
fn oldest_in_page(page: &[SessionRecord]) -> Option<&SessionRecord> {
    page.iter().rev().min_by_key(|session| session.session_time)
}
