//! Command handlers, one module per group of `rk` subcommands.

pub mod commit;
pub mod completion;
pub mod inspect;
pub mod integrate;
pub mod remote;
pub mod resolve;
pub mod submodules;
pub mod version;

use repokit_git::BranchRef;

use crate::cli::TargetArgs;

/// What a [`TargetArgs`] names once parsed.
pub enum Target {
    /// A branch to resolve through `fetch_commit`.
    Branch(BranchRef),
    /// A commit-ish passed to git verbatim.
    Commit(String),
}

impl From<&TargetArgs> for Target {
    fn from(args: &TargetArgs) -> Self {
        if args.commit {
            Target::Commit(args.target.clone())
        } else {
            Target::Branch(BranchRef::new(args.target.clone(), args.remote.clone()))
        }
    }
}
