use thiserror::Error;

/// Failure to run the external `digdag sessions` query
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    NonZeroExit { program: String, status: std::process::ExitStatus, stderr: String },

    #[error("{program} produced output that is not valid UTF-8")]
    InvalidOutput {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// A record block or its embedded params could not be decoded
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Expected {expected} fields in session block, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Params field has no JSON payload: {0:?}")]
    MissingParams(String),

    #[error("Invalid params JSON: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("Invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// The pagination loop cannot continue
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("First page of sessions is empty")]
    EmptyFirstPage,

    #[error("Page of sessions older than id {cursor} is empty")]
    EmptyPage { cursor: i64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, Error>;
