//! Error types for repository-level failures.
//!
//! Git command failures are not errors in this sense: they come back as
//! [`CommandResult`](crate::commands::CommandResult) values or halt the
//! process, depending on the operation's policy.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside of git command execution.
#[derive(Debug, Error)]
pub enum RepokitError {
    /// No `.git` entry was found at or above the given path.
    #[error("not a git repository (or any parent): {}", path.display())]
    NotARepo {
        /// The path the search started from.
        path: PathBuf,
    },
}

/// A specialized `Result` type for repokit operations.
pub type Result<T> = std::result::Result<T, RepokitError>;
