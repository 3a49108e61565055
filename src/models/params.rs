use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ParseError;

/// Scheduling timestamps digdag attaches to every session as `params`
///
/// A session whose scheduled time differs from the time it was last actually
/// executed has been retried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionParams {
    #[serde(deserialize_with = "crate::parsers::timestamps::deserialize_timestamp")]
    pub last_session_time: DateTime<Utc>,
    #[serde(deserialize_with = "crate::parsers::timestamps::deserialize_timestamp")]
    pub next_session_time: DateTime<Utc>,
    #[serde(deserialize_with = "crate::parsers::timestamps::deserialize_timestamp")]
    pub last_executed_session_time: DateTime<Utc>,
}

impl SessionParams {
    /// Decode the raw `params: {...}` line
    ///
    /// The first whitespace-delimited token is the label; everything after it
    /// must be a JSON object carrying all three timestamps. Unknown keys are
    /// ignored.
    pub fn decode(raw: &str) -> Result<Self, ParseError> {
        let payload = raw
            .trim()
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| ParseError::MissingParams(raw.to_string()))?;

        Ok(serde_json::from_str(payload)?)
    }

    pub fn retried(&self) -> bool {
        self.last_session_time != self.last_executed_session_time
    }
}
