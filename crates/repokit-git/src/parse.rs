//! Classification of git's human-readable output.
//!
//! These functions match on exact git wording and on the fixed `ls-tree`
//! column layout. A change to either upstream breaks them; that is accepted.

use crate::commands::ExitError;

/// Printed by `git rebase` when it stops on a conflict.
pub const CONFLICT_MARKER: &str = "Resolve all conflicts manually";

/// Rebase progress text. Seen alongside a non-zero exit it is still a success.
pub const APPLYING_MARKER: &str = "Applying";

/// Outcome of a `git rebase` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// The rebase stopped on conflicts that need manual resolution.
    Conflicts,
    /// The rebase completed.
    Success,
    /// The rebase failed for any other reason.
    Error(ExitError),
}

/// Classify the output and exit status of `git rebase <commit>`.
pub fn classify_rebase(output: &str, error: Option<&ExitError>) -> RebaseOutcome {
    if output.contains(CONFLICT_MARKER) {
        return RebaseOutcome::Conflicts;
    }
    match error {
        Some(_) if output.contains(APPLYING_MARKER) => RebaseOutcome::Success,
        Some(err) => RebaseOutcome::Error(err.clone()),
        None => RebaseOutcome::Success,
    }
}

/// A gitlink row from `git ls-tree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitlinkEntry {
    /// Path relative to the tree root.
    pub path: String,
    /// Commit recorded for the submodule.
    pub commit: String,
}

/// Extract submodule entries from `git ls-tree` output.
///
/// A line is kept only if, after turning tabs into spaces and splitting on
/// single spaces, it has exactly four tokens and one of them is `commit`.
/// Anything else (blobs, trees, paths containing spaces, noise) is dropped.
pub fn parse_ls_tree(output: &str) -> Vec<GitlinkEntry> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.replace('\t', " ");
            let tokens: Vec<&str> = line.split(' ').collect();
            if !tokens.contains(&"commit") || tokens.len() != 4 {
                return None;
            }
            Some(GitlinkEntry {
                path: tokens[3].to_string(),
                commit: tokens[2].to_string(),
            })
        })
        .collect()
}
