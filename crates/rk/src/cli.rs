//! Clap CLI definitions for the `rk` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// rk -- drive git through the repokit facade.
#[derive(Parser, Debug)]
#[command(
    name = "rk",
    about = "Drive common git workflows through the repokit facade",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Repository working tree (default: discovered from the current directory).
    #[arg(long, short = 'C', global = true, env = "RK_REPO")]
    pub repo: Option<PathBuf>,

    /// Configuration file (default: <repo>/.repokit.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Working tree =====
    /// Stage modifications to tracked files (`add -u`).
    Stage,

    /// Commit the staged changes.
    Commit(CommitArgs),

    /// Push a local ref to a branch on a remote.
    Push(PushArgs),

    /// Show `git status HEAD`.
    Status,

    /// Show the last commit.
    LastCommit,

    /// Show the diff against HEAD.
    Diff,

    // ===== Resolution =====
    /// Print the commit a branch resolves to (refreshing its remote first).
    Resolve(BranchArgs),

    /// Print the hash of FETCH_HEAD.
    FetchedHash,

    /// Print the merge base of two commits.
    MergeBase(MergeBaseArgs),

    // ===== Integration =====
    /// Merge a branch or commit.
    Merge(MergeArgs),

    /// Rebase onto a branch or commit.
    Rebase(TargetArgs),

    /// Continue an interrupted rebase.
    RebaseContinue,

    /// Squash everything since a branch or commit into a single commit.
    SquashOnto(SquashArgs),

    // ===== Remotes & submodules =====
    /// Add a remote, or repoint it if it already exists.
    AddRemote(AddRemoteArgs),

    /// List submodules recorded at a reference.
    Submodules(SubmodulesArgs),

    /// Show status for every submodule at HEAD, then the repository itself.
    ForeachStatus,

    // ===== Utilities =====
    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Shared argument groups
// ---------------------------------------------------------------------------

/// A branch, optionally on a remote.
#[derive(Args, Debug, Clone)]
pub struct BranchArgs {
    /// Branch name.
    pub branch: String,

    /// Remote the branch lives on. An empty string skips the remote refresh.
    #[arg(long)]
    pub remote: Option<String>,
}

/// A branch (optionally on a remote) or, with `--commit`, a raw commit.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Branch name, or commit-ish with `--commit`.
    pub target: String,

    /// Remote the branch lives on.
    #[arg(long, conflicts_with = "commit")]
    pub remote: Option<String>,

    /// Treat the target as a commit instead of resolving it as a branch.
    #[arg(long)]
    pub commit: bool,
}

// ---------------------------------------------------------------------------
// Per-command arguments
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short, long)]
    pub message: String,

    /// Stage modifications to tracked files first.
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Local ref to push.
    pub source: String,

    /// Branch name on the remote.
    pub target: String,

    /// Remote to push to.
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Force the update.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct MergeBaseArgs {
    pub a: String,
    pub b: String,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Merge commit message.
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args, Debug)]
pub struct SquashArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Message for the squashed commit.
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args, Debug)]
pub struct AddRemoteArgs {
    pub name: String,
    pub url: String,
}

#[derive(Args, Debug)]
pub struct SubmodulesArgs {
    /// Tree reference, or a branch with `--branch`.
    #[arg(default_value = "HEAD")]
    pub reference: String,

    /// Resolve the reference as a branch first.
    #[arg(long)]
    pub branch: bool,

    /// Remote for `--branch`.
    #[arg(long, requires = "branch")]
    pub remote: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate bash completions.
    Bash,
    /// Generate zsh completions.
    Zsh,
    /// Generate fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_merge_with_remote() {
        let cli = Cli::parse_from(["rk", "merge", "main", "--remote", "origin", "-m", "sync"]);
        match cli.command {
            Some(Commands::Merge(args)) => {
                assert_eq!(args.target.target, "main");
                assert_eq!(args.target.remote.as_deref(), Some("origin"));
                assert!(!args.target.commit);
                assert_eq!(args.message, "sync");
            }
            other => panic!("expected merge, got: {other:?}"),
        }
    }

    #[test]
    fn test_commit_and_remote_conflict() {
        let result = Cli::try_parse_from(["rk", "rebase", "abc", "--commit", "--remote", "origin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_submodules_default_reference() {
        let cli = Cli::parse_from(["rk", "submodules"]);
        match cli.command {
            Some(Commands::Submodules(args)) => assert_eq!(args.reference, "HEAD"),
            other => panic!("expected submodules, got: {other:?}"),
        }
    }
}
