//! Invocation of the external `digdag sessions` command.
//!
//! The fetcher only depends on the [`QueryRunner`] trait so that pagination
//! can be exercised without a digdag server.

use std::path::{Path, PathBuf};
use std::process::Command;

#[cfg(test)]
use mockall::automock;

use crate::error::InvocationError;

pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Fixed part of every `digdag sessions` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub project: String,
    pub workflow: String,
    /// Server endpoint passed with `-e`; empty means the client default
    pub endpoint: String,
    pub page_size: u32,
}

impl SessionQuery {
    pub fn new(project: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            workflow: workflow.into(),
            endpoint: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Arguments following the program name
    ///
    /// `cursor` asks for the page of sessions older than that session id.
    pub fn to_args(&self, cursor: Option<i64>) -> Vec<String> {
        let mut args = vec!["sessions".to_string(), self.project.clone(), self.workflow.clone()];
        if !self.endpoint.is_empty() {
            args.push("-e".to_string());
            args.push(self.endpoint.clone());
        }
        if let Some(cursor) = cursor {
            args.push("-i".to_string());
            args.push(cursor.to_string());
        }
        args.push("-s".to_string());
        args.push(self.page_size.to_string());
        args
    }
}

/// Runs one session listing query and returns its raw text output
#[cfg_attr(test, automock)]
pub trait QueryRunner {
    fn run_query(&self, query: &SessionQuery, cursor: Option<i64>) -> Result<String, InvocationError>;
}

/// [`QueryRunner`] backed by the `digdag` command-line client
///
/// Arguments are passed to the process directly, never through a shell, so
/// project and workflow names are not interpreted.
#[derive(Debug, Clone)]
pub struct DigdagCli {
    program: PathBuf,
}

impl DigdagCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn command(&self, query: &SessionQuery, cursor: Option<i64>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(query.to_args(cursor));
        cmd
    }
}

impl Default for DigdagCli {
    fn default() -> Self {
        Self::new("digdag")
    }
}

impl QueryRunner for DigdagCli {
    fn run_query(&self, query: &SessionQuery, cursor: Option<i64>) -> Result<String, InvocationError> {
        let program = self.program.display().to_string();
        tracing::info!(
            program = %program,
            args = ?query.to_args(cursor),
            "Exec command"
        );

        let output = self
            .command(query, cursor)
            .output()
            .map_err(|source| InvocationError::Spawn { program: program.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(program = %program, status = %output.status, "Query failed");
            return Err(InvocationError::NonZeroExit { program, status: output.status, stderr });
        }

        String::from_utf8(output.stdout).map_err(|source| InvocationError::InvalidOutput { program, source })
    }
}
