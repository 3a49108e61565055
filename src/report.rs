use clap::ValueEnum;

use crate::models::SessionRecord;

/// Which sessions to keep in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Outcome {
    /// Every fetched session
    All,
    /// Sessions with status `error`
    #[default]
    Failed,
    /// Sessions with status `success`
    Succeeded,
    /// Sessions with status `running`
    Running,
    /// Sessions executed at a different time than scheduled
    Retried,
}

impl Outcome {
    pub fn matches(self, session: &SessionRecord) -> bool {
        match self {
            Outcome::All => true,
            Outcome::Failed => session.failed(),
            Outcome::Succeeded => session.succeeded(),
            Outcome::Running => session.running(),
            Outcome::Retried => session.retried(),
        }
    }
}

/// Keep the sessions matching `outcome`, preserving order
pub fn filter_by_outcome(sessions: Vec<SessionRecord>, outcome: Outcome) -> Vec<SessionRecord> {
    sessions.into_iter().filter(|session| outcome.matches(session)).collect()
}

/// Keep the sessions whose status is `error`
pub fn filter_failed(sessions: Vec<SessionRecord>) -> Vec<SessionRecord> {
    filter_by_outcome(sessions, Outcome::Failed)
}

/// One `id, attempt id, session time, status, retried` line per session
pub fn render(sessions: &[SessionRecord]) -> Vec<String> {
    sessions.iter().map(SessionRecord::short_desc).collect()
}

/// Rendered lines as a pretty-printed JSON array
pub fn render_json(sessions: &[SessionRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&render(sessions))
}
