//! `rk merge`, `rk rebase`, `rk rebase-continue`, `rk squash-onto`.

use anyhow::{Result, bail};
use repokit_git::RebaseOutcome;

use crate::cli::{MergeArgs, SquashArgs, TargetArgs};
use crate::commands::Target;
use crate::context::RuntimeContext;
use crate::output::{output_json, report};

/// Exit status used when a rebase stops on conflicts.
const CONFLICT_EXIT_CODE: i32 = 2;

/// Execute the `rk merge` command.
pub fn run_merge(ctx: &RuntimeContext, args: &MergeArgs) -> Result<()> {
    let merged = match Target::from(&args.target) {
        Target::Branch(branch) => ctx.client.merge_branch(&branch, &args.message),
        Target::Commit(commit) => ctx.client.merge_commit(&commit, &args.message),
    };

    if ctx.json {
        output_json(&serde_json::json!({
            "target": args.target.target,
            "merged": merged,
        }));
    }
    if !merged {
        bail!("merge of '{}' failed", args.target.target);
    }
    if !ctx.json {
        println!("Merged {}", args.target.target);
    }
    Ok(())
}

/// Execute the `rk rebase` command.
///
/// Exits with status 2 when the rebase stops on conflicts.
pub fn run_rebase(ctx: &RuntimeContext, args: &TargetArgs) -> Result<()> {
    let outcome = match Target::from(args) {
        Target::Branch(branch) => ctx.client.rebase_with_branch(&branch),
        Target::Commit(commit) => ctx.client.rebase(&commit),
    };

    let label = match &outcome {
        RebaseOutcome::Success => "success",
        RebaseOutcome::Conflicts => "conflicts",
        RebaseOutcome::Error(_) => "error",
    };
    if ctx.json {
        let code = match &outcome {
            RebaseOutcome::Error(err) => Some(err.code().to_string()),
            _ => None,
        };
        output_json(&serde_json::json!({
            "target": args.target,
            "outcome": label,
            "exit_code": code,
        }));
    }

    match outcome {
        RebaseOutcome::Success => {
            if !ctx.json {
                println!("Rebased onto {}", args.target);
            }
            Ok(())
        }
        RebaseOutcome::Conflicts => {
            if !ctx.json {
                eprintln!("Rebase stopped on conflicts. Resolve them, then run 'rk rebase-continue'.");
            }
            std::process::exit(CONFLICT_EXIT_CODE);
        }
        RebaseOutcome::Error(err) => bail!("rebase onto '{}' failed: {err}", args.target),
    }
}

/// Execute the `rk rebase-continue` command.
pub fn run_rebase_continue(ctx: &RuntimeContext) -> Result<()> {
    report(ctx.json, "rebase --continue", &ctx.client.rebase_continue())
}

/// Execute the `rk squash-onto` command.
pub fn run_squash_onto(ctx: &RuntimeContext, args: &SquashArgs) -> Result<()> {
    let result = match Target::from(&args.target) {
        Target::Commit(commit) => ctx.client.rebase_after_commit(&commit, &args.message),
        Target::Branch(branch) => match ctx.client.rebase_to_branch(&branch, &args.message) {
            Some(result) => result,
            None => bail!("could not resolve branch '{branch}'"),
        },
    };
    report(ctx.json, "squash", &result)
}
