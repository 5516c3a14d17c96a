//! Halt-on-error policy.
//!
//! Every git invocation made by [`RepoClient`](crate::client::RepoClient) is
//! tagged with an [`Operation`]. The client looks the operation up in its
//! [`HaltPolicies`] table to decide whether a non-zero exit panics or is
//! handed back to the caller.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What to do when a git command exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltPolicy {
    /// Panic with a diagnostic naming the exit code, output and arguments.
    Abort,
    /// Return the failure to the caller as a typed value.
    Recover,
}

impl HaltPolicy {
    /// `true` maps to [`HaltPolicy::Abort`].
    pub fn from_halt_flag(halt: bool) -> Self {
        if halt { Self::Abort } else { Self::Recover }
    }
}

/// The individual git invocations a [`RepoClient`](crate::client::RepoClient)
/// can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// `add -u`
    Stage,
    /// `commit -m`
    Commit,
    /// `push`
    Push,
    /// `rev-parse --verify FETCH_HEAD`
    FetchedHash,
    /// `merge-base`
    MergeBase,
    /// `merge`
    Merge,
    /// `rebase`
    Rebase,
    /// `rebase --continue`
    RebaseContinue,
    /// `reset --soft`
    Reset,
    /// `status HEAD`
    Status,
    /// `log -1`
    Log,
    /// `diff HEAD`
    Diff,
    /// `remote update`
    RemoteUpdate,
    /// `rev-parse <ref>`
    RevParse,
    /// `remote set-url`
    RemoteSetUrl,
    /// `remote add`
    RemoteAdd,
    /// `ls-tree`
    LsTree,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 17] = [
        Operation::Stage,
        Operation::Commit,
        Operation::Push,
        Operation::FetchedHash,
        Operation::MergeBase,
        Operation::Merge,
        Operation::Rebase,
        Operation::RebaseContinue,
        Operation::Reset,
        Operation::Status,
        Operation::Log,
        Operation::Diff,
        Operation::RemoteUpdate,
        Operation::RevParse,
        Operation::RemoteSetUrl,
        Operation::RemoteAdd,
        Operation::LsTree,
    ];

    /// Kebab-case key used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Stage => "stage",
            Operation::Commit => "commit",
            Operation::Push => "push",
            Operation::FetchedHash => "fetched-hash",
            Operation::MergeBase => "merge-base",
            Operation::Merge => "merge",
            Operation::Rebase => "rebase",
            Operation::RebaseContinue => "rebase-continue",
            Operation::Reset => "reset",
            Operation::Status => "status",
            Operation::Log => "log",
            Operation::Diff => "diff",
            Operation::RemoteUpdate => "remote-update",
            Operation::RevParse => "rev-parse",
            Operation::RemoteSetUrl => "remote-set-url",
            Operation::RemoteAdd => "remote-add",
            Operation::LsTree => "ls-tree",
        }
    }

    /// Built-in policy when no override is configured.
    ///
    /// Only the soft reset inside `rebase_after_commit` and the three
    /// read-only text accessors halt.
    pub fn default_policy(self) -> HaltPolicy {
        match self {
            Operation::Reset | Operation::Status | Operation::Log | Operation::Diff => {
                HaltPolicy::Abort
            }
            _ => HaltPolicy::Recover,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation key that does not name any [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown git operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Per-operation halt policy table.
///
/// Starts from [`Operation::default_policy`]; individual entries can be
/// overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HaltPolicies {
    overrides: HashMap<Operation, HaltPolicy>,
}

impl HaltPolicies {
    /// Override the policy for one operation.
    pub fn set(&mut self, op: Operation, policy: HaltPolicy) -> &mut Self {
        self.overrides.insert(op, policy);
        self
    }

    /// Builder-style variant of [`HaltPolicies::set`].
    pub fn with(mut self, op: Operation, policy: HaltPolicy) -> Self {
        self.set(op, policy);
        self
    }

    /// The effective policy for `op`.
    pub fn policy_for(&self, op: Operation) -> HaltPolicy {
        self.overrides
            .get(&op)
            .copied()
            .unwrap_or_else(|| op.default_policy())
    }
}
