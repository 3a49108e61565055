//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use digdag_sessions::{InvocationError, QueryRunner, SessionQuery};
use tempfile::TempDir;

pub const HEADER: &str = "Session attempts:";

/// Builder for one session block as printed by `digdag sessions`
#[derive(Clone)]
pub struct SessionBlockBuilder {
    id: i64,
    attempt_id: i64,
    project: String,
    workflow: String,
    session_time: String,
    retry_attempt_name: String,
    last_executed_session_time: Option<String>,
    params_override: Option<String>,
    status: String,
}

impl SessionBlockBuilder {
    /// Create a successful session with the given id and session time
    pub fn new(id: i64, session_time: &str) -> Self {
        Self {
            id,
            attempt_id: id + 1000,
            project: "sales".to_string(),
            workflow: "daily_report".to_string(),
            session_time: session_time.to_string(),
            retry_attempt_name: String::new(),
            last_executed_session_time: None,
            params_override: None,
            status: "success".to_string(),
        }
    }

    /// Set the status
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Set the attempt id
    pub fn attempt_id(mut self, attempt_id: i64) -> Self {
        self.attempt_id = attempt_id;
        self
    }

    /// Mark the session as retried by moving its last executed time
    pub fn retried_from(mut self, last_executed_session_time: &str) -> Self {
        self.last_executed_session_time = Some(last_executed_session_time.to_string());
        self.retry_attempt_name = "retry1".to_string();
        self
    }

    /// Replace the whole params line
    pub fn raw_params(mut self, params_line: &str) -> Self {
        self.params_override = Some(params_line.to_string());
        self
    }

    /// Render the block, indented like the CLI output
    pub fn to_text(&self) -> String {
        let last_executed =
            self.last_executed_session_time.as_deref().unwrap_or(&self.session_time);
        let params = self.params_override.clone().unwrap_or_else(|| {
            format!(
                r#"params: {{"last_session_time":"{}","next_session_time":"{}","last_executed_session_time":"{}"}}"#,
                self.session_time, self.session_time, last_executed
            )
        });

        [
            format!("session id: {}", self.id),
            format!("attempt id: {}", self.attempt_id),
            format!("uuid: 6f1e2d3c-4b5a-4978-8a6b-{:012}", self.id),
            format!("project: {}", self.project),
            format!("workflow: {}", self.workflow),
            format!("session time: {}", self.session_time),
            format!("retry attempt name: {}", self.retry_attempt_name),
            params,
            format!("created at: {}", self.session_time),
            "kill requested: false".to_string(),
            format!("status: {}", self.status),
        ]
        .iter()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Render a page: header line followed by the blocks in the given order
pub fn page_text(blocks: &[SessionBlockBuilder]) -> String {
    let body = blocks.iter().map(|b| b.to_text()).collect::<Vec<_>>().join("\n\n");
    format!("{}\n{}\n", HEADER, body)
}

/// [`QueryRunner`] that replays canned responses and records every cursor it was called with
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<Result<String, InvocationError>>>,
    calls: RefCell<Vec<Option<i64>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self { responses: RefCell::new(VecDeque::new()), calls: RefCell::new(Vec::new()) }
    }

    /// Queue a page of raw text
    pub fn with_page(self, text: impl Into<String>) -> Self {
        self.responses.borrow_mut().push_back(Ok(text.into()));
        self
    }

    /// Queue an invocation failure
    pub fn with_failure(self, error: InvocationError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    /// Cursors passed to each invocation so far
    pub fn calls(&self) -> Vec<Option<i64>> {
        self.calls.borrow().clone()
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRunner for &ScriptedRunner {
    fn run_query(&self, _query: &SessionQuery, cursor: Option<i64>) -> Result<String, InvocationError> {
        self.calls.borrow_mut().push(cursor);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected invocation with cursor {:?}", cursor))
    }
}

/// A fake `digdag` executable in a temporary directory
///
/// The script appends its arguments to `args.log` and prints `page1.txt`, or
/// `page2.txt` when called with a cursor.
pub struct FakeDigdag {
    temp_dir: TempDir,
}

impl FakeDigdag {
    pub fn new(first_page: &str, older_page: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path();
        fs::write(dir.join("page1.txt"), first_page).expect("Failed to write page1.txt");
        fs::write(dir.join("page2.txt"), older_page).expect("Failed to write page2.txt");

        let script = format!(
            "#!/bin/sh\nfor arg in \"$@\"; do printf '[%s]' \"$arg\" >> '{dir}/args.log'; done\necho >> '{dir}/args.log'\ncase \" $* \" in\n  *\" -i \"*) cat '{dir}/page2.txt' ;;\n  *) cat '{dir}/page1.txt' ;;\nesac\n",
            dir = dir.display()
        );
        write_executable(&dir.join("digdag"), &script);

        Self { temp_dir }
    }

    /// A fake client that prints to stderr and exits with status 1
    pub fn failing(message: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let script = format!("#!/bin/sh\necho '{}' >&2\nexit 1\n", message);
        write_executable(&temp_dir.path().join("digdag"), &script);
        Self { temp_dir }
    }

    pub fn program(&self) -> PathBuf {
        self.temp_dir.path().join("digdag")
    }

    /// One line per invocation, each argument wrapped in brackets
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.temp_dir.path().join("args.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, content).expect("Failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
}

#[cfg(not(unix))]
fn write_executable(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write script");
}
