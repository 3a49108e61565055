use chrono::{DateTime, Utc};

use super::params::SessionParams;
use crate::error::ParseError;
use crate::parsers::fields::{extract, extract_integer};
use crate::parsers::timestamps::parse_timestamp;

/// Number of `label: value` lines in one session block
pub const SESSION_FIELD_COUNT: usize = 11;

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";
const STATUS_RUNNING: &str = "running";

/// One session attempt as listed by `digdag sessions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: i64,
    pub attempt_id: i64,
    pub uuid: String,
    pub project: String,
    pub workflow: String,
    pub session_time: DateTime<Utc>,
    pub retry_attempt_name: String,
    pub params: SessionParams,
    pub created_at: DateTime<Utc>,
    pub kill_requested: String,
    pub status: String,
}

impl SessionRecord {
    /// Decode one session block from its trimmed lines
    ///
    /// Fields are positional: id, attempt id, uuid, project, workflow,
    /// session time, retry attempt name, params, created at, kill requested,
    /// status. The block must have exactly [`SESSION_FIELD_COUNT`] lines.
    /// Text fields with a missing label decode to an empty string and ids to
    /// `0`; the timestamps and params are required.
    pub fn decode<S: AsRef<str>>(fields: &[S]) -> Result<Self, ParseError> {
        let [
            id,
            attempt_id,
            uuid,
            project,
            workflow,
            session_time,
            retry_attempt_name,
            params,
            created_at,
            kill_requested,
            status,
        ] = fields
        else {
            return Err(ParseError::FieldCount {
                expected: SESSION_FIELD_COUNT,
                found: fields.len(),
            });
        };

        Ok(Self {
            id: extract_integer(id.as_ref()),
            attempt_id: extract_integer(attempt_id.as_ref()),
            uuid: extract(uuid.as_ref(), false),
            project: extract(project.as_ref(), false),
            workflow: extract(workflow.as_ref(), false),
            session_time: decode_time("session time", session_time.as_ref())?,
            retry_attempt_name: extract(retry_attempt_name.as_ref(), false),
            params: SessionParams::decode(params.as_ref())?,
            created_at: decode_time("created at", created_at.as_ref())?,
            kill_requested: extract(kill_requested.as_ref(), false),
            status: extract(status.as_ref(), false),
        })
    }

    pub fn retried(&self) -> bool {
        self.params.retried()
    }

    pub fn succeeded(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn failed(&self) -> bool {
        self.status == STATUS_ERROR
    }

    pub fn running(&self) -> bool {
        self.status == STATUS_RUNNING
    }

    /// `id, attempt id, session time, status, retried`
    pub fn short_desc(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.id,
            self.attempt_id,
            self.session_time,
            self.status,
            self.retried()
        )
    }
}

fn decode_time(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = extract(raw, true);
    parse_timestamp(&value).ok_or(ParseError::InvalidTimestamp { field, value })
}
