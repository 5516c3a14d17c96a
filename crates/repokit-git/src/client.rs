//! [`RepoClient`] -- the git facade.
//!
//! A client is bound to one working tree. Each public method assembles a
//! fixed argument vector, runs it through the client's [`CommandRunner`],
//! and turns the result into a plain value: an `Option`, a `bool`, a
//! [`RebaseOutcome`], or the raw [`CommandResult`] for fire-and-forget calls.
//!
//! Whether a non-zero exit panics or is returned is decided per
//! [`Operation`] by the client's [`HaltPolicies`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::branch::BranchRef;
use crate::commands::{CommandResult, CommandRunner, ExitError, SystemRunner};
use crate::discover::discover_repo_root;
use crate::error::{RepokitError, Result};
use crate::parse::{RebaseOutcome, classify_rebase, parse_ls_tree};
use crate::policy::{HaltPolicies, HaltPolicy, Operation};

/// Default git executable.
pub const DEFAULT_GIT_BINARY: &str = "git";

/// Exit code reported by [`RepoClient::rebase_with_branch`] when the branch
/// cannot be resolved.
const UNRESOLVED_BRANCH_CODE: &str = "1";

// ---------------------------------------------------------------------------
// Submodules
// ---------------------------------------------------------------------------

/// A submodule recorded in a tree, with a client pointed at its directory.
#[derive(Debug, Clone)]
pub struct SubmoduleEntry {
    /// Client bound to `<parent>/<submodule path>`.
    pub client: RepoClient,
    /// Commit the parent tree records for the submodule.
    pub commit: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Facade over the git command line for one repository.
#[derive(Clone)]
pub struct RepoClient {
    repo_path: PathBuf,
    git_binary: String,
    runner: Arc<dyn CommandRunner>,
    policies: HaltPolicies,
}

impl fmt::Debug for RepoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoClient")
            .field("repo_path", &self.repo_path)
            .field("git_binary", &self.git_binary)
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

impl RepoClient {
    /// Bind a client to the working tree at `repo_path`.
    ///
    /// Uses the system `git` and the default halt policies.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            git_binary: DEFAULT_GIT_BINARY.to_string(),
            runner: Arc::new(SystemRunner),
            policies: HaltPolicies::default(),
        }
    }

    /// Bind a client to the repository containing `start`.
    ///
    /// # Errors
    ///
    /// Returns [`RepokitError::NotARepo`] if no ancestor of `start` has a
    /// `.git` entry.
    pub fn discover(start: &Path) -> Result<Self> {
        let root = discover_repo_root(start).ok_or_else(|| RepokitError::NotARepo {
            path: start.to_path_buf(),
        })?;
        Ok(Self::new(root))
    }

    /// Replace the command runner.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the halt policy table.
    pub fn with_policies(mut self, policies: HaltPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Use a different git executable.
    pub fn with_git_binary(mut self, binary: impl Into<String>) -> Self {
        self.git_binary = binary.into();
        self
    }

    /// Working tree root.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Git metadata directory, always `<repo_path>/.git`.
    pub fn git_dir(&self) -> PathBuf {
        self.repo_path.join(".git")
    }

    /// The halt policy table in effect.
    pub fn policies(&self) -> &HaltPolicies {
        &self.policies
    }

    /// A client for a nested working tree sharing this client's settings.
    fn child(&self, repo_path: PathBuf) -> Self {
        Self {
            repo_path,
            ..self.clone()
        }
    }

    // -----------------------------------------------------------------------
    // Invocation
    // -----------------------------------------------------------------------

    /// Run `git --git-dir <repo>/.git --work-tree <repo> <subcommand...>`.
    ///
    /// # Panics
    ///
    /// Panics on a non-zero exit when `op` is configured with
    /// [`HaltPolicy::Abort`].
    fn git(&self, op: Operation, subcommand: &[&str]) -> CommandResult {
        let mut args = Vec::with_capacity(subcommand.len() + 5);
        args.push(self.git_binary.clone());
        args.push("--git-dir".to_string());
        args.push(self.git_dir().display().to_string());
        args.push("--work-tree".to_string());
        args.push(self.repo_path.display().to_string());
        args.extend(subcommand.iter().map(|s| s.to_string()));

        debug!(%op, ?args, "running git");
        let result = self.runner.run(&args);

        if let Some(err) = &result.error {
            match self.policies.policy_for(op) {
                HaltPolicy::Abort => {
                    error!(%op, code = err.code(), output = %result.output, ?args, "git failed, halting");
                    panic!(
                        "git {op} failed with exit code {}\noutput: {}\nargs: {:?}",
                        err.code(),
                        result.output,
                        args
                    );
                }
                HaltPolicy::Recover => {
                    debug!(%op, code = err.code(), "git failed");
                }
            }
        }

        result
    }

    /// Run a command whose result callers usually ignore.
    fn fire(&self, op: Operation, subcommand: &[&str]) -> CommandResult {
        let result = self.git(op, subcommand);
        if let Some(err) = &result.error {
            warn!(%op, repo = %self.repo_path.display(), code = err.code(), "git command failed");
        }
        result
    }

    // -----------------------------------------------------------------------
    // Working tree
    // -----------------------------------------------------------------------

    /// `git add -u`
    pub fn stage_all_changes(&self) -> CommandResult {
        self.fire(Operation::Stage, &["add", "-u"])
    }

    /// `git commit -m <message>`
    pub fn commit(&self, message: &str) -> CommandResult {
        self.fire(Operation::Commit, &["commit", "-m", message])
    }

    /// `git push [--force] <remote> <source>:refs/heads/<target>`
    pub fn push(&self, source: &str, target: &str, remote: &str, force: bool) -> CommandResult {
        let refspec = format!("{source}:refs/heads/{target}");
        let mut args = vec!["push"];
        if force {
            args.push("--force");
        }
        args.push(remote);
        args.push(&refspec);
        self.fire(Operation::Push, &args)
    }

    /// `git status HEAD`, trimmed. Halts on failure by default.
    pub fn status_message(&self) -> String {
        self.git(Operation::Status, &["status", "HEAD"])
            .trimmed()
            .to_string()
    }

    /// `git log -1`, trimmed. Halts on failure by default.
    pub fn last_commit_message(&self) -> String {
        self.git(Operation::Log, &["log", "-1"]).trimmed().to_string()
    }

    /// `git diff HEAD`, trimmed. Halts on failure by default.
    pub fn current_diff(&self) -> String {
        self.git(Operation::Diff, &["diff", "HEAD"])
            .trimmed()
            .to_string()
    }

    // -----------------------------------------------------------------------
    // Commit resolution
    // -----------------------------------------------------------------------

    /// Hash of `FETCH_HEAD`, or `None` if it does not resolve.
    pub fn fetched_hash(&self) -> Option<String> {
        self.git(Operation::FetchedHash, &["rev-parse", "--verify", "FETCH_HEAD"])
            .value()
    }

    /// `git merge-base <a> <b>`.
    pub fn most_recent_ancestor_commit(&self, a: &str, b: &str) -> Option<String> {
        self.git(Operation::MergeBase, &["merge-base", a, b]).value()
    }

    /// Resolve `branch` to a commit hash.
    ///
    /// When the branch names a non-empty remote, `git remote update <remote>`
    /// runs first and its failure short-circuits to `None`. An empty remote
    /// skips the refresh but is still part of the qualified name.
    pub fn fetch_commit(&self, branch: &BranchRef) -> Option<String> {
        if let Some(remote) = branch.remote().filter(|r| !r.is_empty()) {
            let update = self.git(Operation::RemoteUpdate, &["remote", "update", remote]);
            if !update.is_success() {
                return None;
            }
        }
        let qualified = branch.remote_qualified_name();
        self.git(Operation::RevParse, &["rev-parse", &qualified]).value()
    }

    // -----------------------------------------------------------------------
    // Merge & rebase
    // -----------------------------------------------------------------------

    /// `git merge <commit> -m <message>`; `true` on success.
    pub fn merge_commit(&self, commit: &str, message: &str) -> bool {
        self.git(Operation::Merge, &["merge", commit, "-m", message])
            .is_success()
    }

    /// Resolve `branch` and merge it. `false` if resolution or merge fails.
    pub fn merge_branch(&self, branch: &BranchRef, message: &str) -> bool {
        match self.fetch_commit(branch) {
            Some(commit) => self.merge_commit(&commit, message),
            None => false,
        }
    }

    /// `git rebase <commit>`, classified.
    pub fn rebase(&self, commit: &str) -> RebaseOutcome {
        let result = self.git(Operation::Rebase, &["rebase", commit]);
        let outcome = classify_rebase(&result.output, result.error.as_ref());
        debug!(repo = %self.repo_path.display(), commit, ?outcome, "rebase finished");
        outcome
    }

    /// Resolve `branch` and rebase onto it.
    ///
    /// Reports `Error` with exit code `1` when the branch does not resolve.
    pub fn rebase_with_branch(&self, branch: &BranchRef) -> RebaseOutcome {
        match self.fetch_commit(branch) {
            Some(commit) => self.rebase(&commit),
            None => RebaseOutcome::Error(ExitError::new(UNRESOLVED_BRANCH_CODE)),
        }
    }

    /// `git rebase --continue`
    pub fn rebase_continue(&self) -> CommandResult {
        self.fire(Operation::RebaseContinue, &["rebase", "--continue"])
    }

    /// Squash everything since `commit` into one new commit.
    ///
    /// Runs `git reset --soft <commit>`, then [`stage_all_changes`], then
    /// [`commit`]. The reset halts by default; under
    /// [`HaltPolicy::Recover`] a failed reset stops the sequence and its
    /// result is returned.
    ///
    /// [`stage_all_changes`]: RepoClient::stage_all_changes
    /// [`commit`]: RepoClient::commit
    pub fn rebase_after_commit(&self, commit: &str, message: &str) -> CommandResult {
        let reset = self.git(Operation::Reset, &["reset", "--soft", commit]);
        if !reset.is_success() {
            return reset;
        }
        self.stage_all_changes();
        self.commit(message)
    }

    /// Resolve `branch` and squash onto it. `None` when resolution fails.
    pub fn rebase_to_branch(&self, branch: &BranchRef, message: &str) -> Option<CommandResult> {
        let commit = self.fetch_commit(branch)?;
        Some(self.rebase_after_commit(&commit, message))
    }

    // -----------------------------------------------------------------------
    // Remotes
    // -----------------------------------------------------------------------

    /// Point `name` at `url`, creating the remote if needed.
    ///
    /// Both `remote set-url` and `remote add` are always attempted; exactly
    /// one of them is expected to fail.
    pub fn add_remote(&self, name: &str, url: &str) {
        self.git(Operation::RemoteSetUrl, &["remote", "set-url", name, url]);
        self.git(Operation::RemoteAdd, &["remote", "add", name, url]);
    }

    // -----------------------------------------------------------------------
    // Submodules
    // -----------------------------------------------------------------------

    /// Submodules recorded in the tree at `reference`, in `ls-tree` order.
    ///
    /// Returns an empty list if `ls-tree` fails: the output of a failed
    /// listing is discarded rather than run through the line parser.
    pub fn submodule_states(&self, reference: &str) -> Vec<SubmoduleEntry> {
        let result = self.git(Operation::LsTree, &["ls-tree", reference]);
        if !result.is_success() {
            return Vec::new();
        }
        parse_ls_tree(&result.output)
            .into_iter()
            .map(|entry| SubmoduleEntry {
                client: self.child(self.repo_path.join(&entry.path)),
                commit: entry.commit,
            })
            .collect()
    }

    /// Submodules recorded at the commit `branch` resolves to.
    ///
    /// Empty when the branch does not resolve.
    pub fn submodule_states_for_branch(&self, branch: &BranchRef) -> Vec<SubmoduleEntry> {
        match self.fetch_commit(branch) {
            Some(commit) => self.submodule_states(&commit),
            None => Vec::new(),
        }
    }

    /// Run `action` on each submodule at `HEAD`, then on this repository.
    pub fn perform_repo_and_submodule_action<F>(&self, mut action: F)
    where
        F: FnMut(&RepoClient),
    {
        for entry in self.submodule_states("HEAD") {
            action(&entry.client);
        }
        action(self);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
