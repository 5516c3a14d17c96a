//! End-to-end CLI integration tests for the `rk` binary.
//!
//! Each test creates its own temporary repository and exercises the `rk`
//! binary as a subprocess via `assert_cmd`.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `rk` binary.
fn rk() -> Command {
    let mut cmd = Command::cargo_bin("rk").unwrap();
    for key in ["REPOKIT_GIT__BINARY", "REPOKIT_LOG__FILTER", "RK_REPO"] {
        cmd.env_remove(key);
    }
    cmd
}

/// Run raw git in `dir`, returning trimmed stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository with one tracked, uncommitted file.
fn init_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    git(dir, &["init", "--quiet"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(dir, &["config", "user.name", "Repokit Test"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    std::fs::write(dir.join("README"), "hello\n").unwrap();
    git(dir, &["add", "README"]);
    tmp
}

/// `init_repo` plus an initial commit made through `rk`.
fn committed_repo() -> TempDir {
    let tmp = init_repo();
    rk().args(["commit", "-m", "init"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tmp
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

#[test]
fn version_prints_name() {
    rk().arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rk version"));
}

#[test]
fn completion_generates_script() {
    rk().args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rk"));
}

#[test]
fn outside_repository_fails() {
    let tmp = TempDir::new().unwrap();
    rk().arg("status")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

// ---------------------------------------------------------------------------
// Commit flow
// ---------------------------------------------------------------------------

#[test]
fn commit_then_last_commit() {
    let tmp = committed_repo();
    rk().arg("last-commit")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("init"));
}

#[test]
fn commit_all_stages_modifications() {
    let tmp = committed_repo();
    std::fs::write(tmp.path().join("README"), "changed\n").unwrap();

    rk().args(["diff"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("+changed"));

    rk().args(["commit", "-a", "-m", "second"])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(git(tmp.path(), &["log", "-1", "--format=%s"]), "second");
}

#[test]
fn commit_with_nothing_to_commit_fails() {
    let tmp = committed_repo();
    rk().args(["commit", "-m", "again", "--json"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"success\": false"));
}

#[test]
fn repo_flag_works_from_elsewhere() {
    let tmp = committed_repo();
    let elsewhere = TempDir::new().unwrap();
    rk().arg("--repo")
        .arg(tmp.path())
        .arg("last-commit")
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("init"));
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn resolve_branch_as_json() {
    let tmp = committed_repo();
    let head = git(tmp.path(), &["rev-parse", "HEAD"]);

    let output = rk()
        .args(["resolve", "main", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["commit"].as_str().unwrap(), head);
}

#[test]
fn resolve_missing_branch_fails() {
    let tmp = committed_repo();
    rk().args(["resolve", "missing"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not resolve branch 'missing'"));
}

#[test]
fn rebase_onto_unknown_commit_fails() {
    let tmp = committed_repo();
    rk().args(["rebase", "nope", "--commit"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rebase onto 'nope' failed"));
}

// ---------------------------------------------------------------------------
// Remotes & submodules
// ---------------------------------------------------------------------------

#[test]
fn add_remote_is_repeatable() {
    let tmp = init_repo();
    for _ in 0..2 {
        rk().args(["add-remote", "origin", "https://example.com/r.git"])
            .current_dir(tmp.path())
            .assert()
            .success();
    }
    assert_eq!(
        git(tmp.path(), &["remote", "get-url", "origin"]),
        "https://example.com/r.git"
    );
}

#[test]
fn submodules_lists_gitlinks_as_json() {
    let tmp = committed_repo();
    let dir = tmp.path();
    let head = git(dir, &["rev-parse", "HEAD"]);
    let cacheinfo = format!("160000,{head},vendored");
    git(dir, &["update-index", "--add", "--cacheinfo", &cacheinfo]);
    git(dir, &["commit", "--quiet", "-m", "add gitlink"]);

    let output = rk()
        .args(["submodules", "--json"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["commit"].as_str().unwrap(), head);
    assert!(entries[0]["path"].as_str().unwrap().ends_with("/vendored"));
}

// ---------------------------------------------------------------------------
// Halt policy
// ---------------------------------------------------------------------------

#[test]
fn status_halts_on_git_failure() {
    let missing = TempDir::new().unwrap().path().join("gone");
    rk().arg("--repo")
        .arg(&missing)
        .arg("status")
        .assert()
        .failure()
        .code(101)
        .stderr(predicate::str::contains("git status failed"));
}

#[test]
fn status_recovers_when_configured() {
    let missing = TempDir::new().unwrap().path().join("gone");
    rk().arg("--repo")
        .arg(&missing)
        .arg("status")
        .env("REPOKIT_HALT_ON_ERROR__STATUS", "false")
        .assert()
        .success();
}

#[test]
fn verbose_logs_discovery_failures() {
    let tmp = TempDir::new().unwrap();
    rk().args(["--verbose", "status"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("searching for repository root"))
        .stderr(predicate::str::contains("not a git repository"));
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

#[test]
fn version_reports_configured_git_binary() {
    let tmp = TempDir::new().unwrap();
    let output = rk()
        .args(["version", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["git_binary"].as_str().unwrap(), "git");
    assert!(json["git_version"].as_str().unwrap().starts_with("git version"));
}

#[test]
fn version_with_missing_git_binary() {
    let tmp = TempDir::new().unwrap();
    let output = rk()
        .args(["version", "--json"])
        .env("REPOKIT_GIT__BINARY", "/nonexistent/bin/git-xyz")
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["git_binary"].as_str().unwrap(), "/nonexistent/bin/git-xyz");
    assert!(json["git_version"].is_null());
}

// ---------------------------------------------------------------------------
// Staging & pushing
// ---------------------------------------------------------------------------

#[test]
fn stage_picks_up_modifications() {
    let tmp = committed_repo();
    std::fs::write(tmp.path().join("README"), "changed\n").unwrap();

    rk().arg("stage").current_dir(tmp.path()).assert().success();
    assert_eq!(git(tmp.path(), &["diff", "--cached", "--name-only"]), "README");
}

#[test]
fn push_to_bare_remote() {
    let tmp = committed_repo();
    let remote = TempDir::new().unwrap();
    git(remote.path(), &["init", "--quiet", "--bare"]);
    let head = git(tmp.path(), &["rev-parse", "HEAD"]);

    rk().args(["push", "main", "published", "--remote"])
        .arg(remote.path())
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(git(remote.path(), &["rev-parse", "published"]), head);
}

// ---------------------------------------------------------------------------
// History queries
// ---------------------------------------------------------------------------

#[test]
fn merge_base_of_diverged_branches() {
    let tmp = committed_repo();
    let dir = tmp.path();
    let base = git(dir, &["rev-parse", "HEAD"]);
    git(dir, &["checkout", "--quiet", "-b", "topic"]);
    commit_file(dir, "b.txt", "topic\n", "topic work");
    git(dir, &["checkout", "--quiet", "main"]);
    commit_file(dir, "c.txt", "main\n", "main work");

    rk().args(["merge-base", "main", "topic"])
        .current_dir(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(base));
}

#[test]
fn fetched_hash_without_fetch_fails() {
    let tmp = committed_repo();
    rk().arg("fetched-hash")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("FETCH_HEAD does not resolve"));
}

#[test]
fn fetched_hash_after_fetch() {
    let tmp = committed_repo();
    let dir = tmp.path();
    let head = git(dir, &["rev-parse", "HEAD"]);
    git(dir, &["fetch", "--quiet", ".", "main"]);

    rk().arg("fetched-hash")
        .current_dir(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(head));
}

// ---------------------------------------------------------------------------
// Merging & rebasing
// ---------------------------------------------------------------------------

/// Write `content` to `name`, track it, and commit with `message`.
fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "--quiet", "-m", message]);
}

/// `topic` and `main` both edit `README`; `topic` is checked out.
fn conflicting_repo() -> TempDir {
    let tmp = committed_repo();
    let dir = tmp.path();
    git(dir, &["checkout", "--quiet", "-b", "topic"]);
    commit_file(dir, "README", "topic\n", "topic edit");
    git(dir, &["checkout", "--quiet", "main"]);
    commit_file(dir, "README", "main\n", "main edit");
    git(dir, &["checkout", "--quiet", "topic"]);
    tmp
}

#[test]
fn merge_branch_succeeds() {
    let tmp = committed_repo();
    let dir = tmp.path();
    git(dir, &["checkout", "--quiet", "-b", "topic"]);
    commit_file(dir, "b.txt", "topic\n", "topic work");
    git(dir, &["checkout", "--quiet", "main"]);
    commit_file(dir, "c.txt", "main\n", "main work");

    rk().args(["merge", "topic", "-m", "merge topic"])
        .current_dir(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged topic"));
    assert!(dir.join("b.txt").exists());
    assert_eq!(git(dir, &["log", "-1", "--format=%s"]), "merge topic");
}

#[test]
fn merge_missing_branch_fails() {
    let tmp = committed_repo();
    rk().args(["merge", "missing", "-m", "m"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("merge of 'missing' failed"));
}

#[test]
fn rebase_with_conflicts_exits_2() {
    let tmp = conflicting_repo();
    rk().args(["rebase", "main"])
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rk rebase-continue"));
}

#[test]
fn rebase_with_conflicts_as_json() {
    let tmp = conflicting_repo();
    let output = rk()
        .args(["rebase", "main", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["outcome"].as_str().unwrap(), "conflicts");
}

#[test]
fn rebase_continue_without_rebase_fails() {
    let tmp = committed_repo();
    rk().arg("rebase-continue")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rebase --continue failed"));
}

#[test]
fn squash_onto_commit_reduces_history() {
    let tmp = committed_repo();
    let dir = tmp.path();
    let base = git(dir, &["rev-parse", "HEAD"]);
    commit_file(dir, "README", "two\n", "step 1");
    commit_file(dir, "README", "three\n", "step 2");
    assert_eq!(git(dir, &["rev-list", "--count", "HEAD"]), "3");

    rk().args(["squash-onto", base.as_str(), "--commit", "-m", "squashed"])
        .current_dir(dir)
        .assert()
        .success();
    assert_eq!(git(dir, &["rev-list", "--count", "HEAD"]), "2");
    assert_eq!(git(dir, &["rev-parse", "HEAD~1"]), base);
    assert_eq!(git(dir, &["log", "-1", "--format=%s"]), "squashed");
}

#[test]
fn squash_onto_branch_resolves_first() {
    let tmp = committed_repo();
    let dir = tmp.path();
    git(dir, &["branch", "base"]);
    commit_file(dir, "README", "two\n", "step 1");
    commit_file(dir, "README", "three\n", "step 2");

    rk().args(["squash-onto", "base", "-m", "squashed"])
        .current_dir(dir)
        .assert()
        .success();
    assert_eq!(git(dir, &["rev-list", "--count", "HEAD"]), "2");
}

#[test]
fn squash_onto_missing_branch_fails() {
    let tmp = committed_repo();
    rk().args(["squash-onto", "missing", "-m", "s"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not resolve branch 'missing'"));
}

// ---------------------------------------------------------------------------
// Submodule traversal
// ---------------------------------------------------------------------------

/// Create a committed repository at `dir/name` and record it as a gitlink
/// in the parent's index.
fn add_nested_repo(dir: &Path, name: &str) {
    let nested = dir.join(name);
    std::fs::create_dir(&nested).unwrap();
    git(&nested, &["init", "--quiet"]);
    git(&nested, &["config", "user.name", "Repokit Test"]);
    git(&nested, &["config", "user.email", "test@example.com"]);
    git(&nested, &["config", "commit.gpgsign", "false"]);
    commit_file(&nested, "lib.txt", "lib\n", "nested init");
    git(dir, &["add", name]);
}

#[test]
fn foreach_status_visits_submodules_then_self() {
    let tmp = committed_repo();
    let dir = tmp.path();
    add_nested_repo(dir, "mod-a");
    add_nested_repo(dir, "mod-b");
    git(dir, &["commit", "--quiet", "-m", "add nested repos"]);

    let output = rk()
        .args(["foreach-status", "--json"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();

    let root = dir.canonicalize().unwrap();
    assert_eq!(
        paths,
        vec![
            root.join("mod-a").to_str().unwrap(),
            root.join("mod-b").to_str().unwrap(),
            root.to_str().unwrap(),
        ]
    );
}
