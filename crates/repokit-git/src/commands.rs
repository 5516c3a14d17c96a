//! Git subprocess execution.
//!
//! Everything that actually spawns a process lives behind the
//! [`CommandRunner`] trait so that [`RepoClient`](crate::client::RepoClient)
//! can be driven by a scripted runner in tests. [`SystemRunner`] is the real
//! implementation built on `std::process::Command`.

use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::warn;

/// Exit code reported when the git binary could not be spawned at all.
///
/// Mirrors the conventional shell status for "command not found".
pub const SPAWN_FAILURE_CODE: &str = "127";

/// Exit code reported when the child was terminated by a signal.
pub const SIGNAL_CODE: &str = "signal";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A non-zero git exit, carrying only the stringified exit code.
///
/// Nothing else is captured: no separate stderr, no parsed diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("git exited with code {code}")]
pub struct ExitError {
    code: String,
}

impl ExitError {
    /// Create an error for the given exit code text.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Build an error from a finished process status.
    fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::new(code.to_string()),
            None => Self::new(SIGNAL_CODE),
        }
    }

    /// The exit code as text.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Raw output of one git invocation plus its exit error, if any.
///
/// `output` is stdout followed by stderr, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Captured output text.
    pub output: String,
    /// Set when the process exited non-zero (or could not be spawned).
    pub error: Option<ExitError>,
}

impl CommandResult {
    /// A successful result with the given output.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    /// A failed result with the given output and exit code.
    pub fn failure(output: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: Some(ExitError::new(code)),
        }
    }

    /// Whether the process exited with status zero.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The output with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.output.trim()
    }

    /// The trimmed output on success, `None` on any failure.
    pub fn value(&self) -> Option<String> {
        if self.is_success() {
            Some(self.trimmed().to_string())
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Runner seam
// ---------------------------------------------------------------------------

/// Executes a full argument vector (`args[0]` is the program) and blocks
/// until the process exits.
pub trait CommandRunner: Send + Sync {
    /// Run the command and capture its output and exit status.
    fn run(&self, args: &[String]) -> CommandResult;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[String]) -> CommandResult {
        let Some((program, rest)) = args.split_first() else {
            return CommandResult::failure("empty argument vector", SPAWN_FAILURE_CODE);
        };

        // `output()` owns the pipes and reaps the child before returning.
        let output = match Command::new(program).args(rest).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(%program, error = %e, "failed to spawn git");
                return CommandResult::failure(e.to_string(), SPAWN_FAILURE_CODE);
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            CommandResult::success(text)
        } else {
            CommandResult {
                output: text,
                error: Some(ExitError::from_status(output.status)),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
