//! Typed facade over the `git` command-line tool.
//!
//! [`RepoClient`] binds to a working tree and exposes stage, commit, push,
//! fetch, merge, rebase and submodule enumeration as methods that run the
//! real `git` binary and classify its output. Process execution goes
//! through the [`CommandRunner`] trait so the facade can be tested without
//! spawning anything.

pub mod branch;
pub mod client;
pub mod commands;
pub mod discover;
pub mod error;
pub mod parse;
pub mod policy;

#[cfg(test)]
mod testing;

pub use branch::BranchRef;
pub use client::{RepoClient, SubmoduleEntry};
pub use commands::{CommandResult, CommandRunner, ExitError, SystemRunner};
pub use error::{RepokitError, Result};
pub use parse::RebaseOutcome;
pub use policy::{HaltPolicies, HaltPolicy, Operation};
