//! `rk resolve`, `rk fetched-hash`, `rk merge-base`.

use anyhow::Result;
use repokit_git::BranchRef;

use crate::cli::{BranchArgs, MergeBaseArgs};
use crate::context::RuntimeContext;
use crate::output::report_value;

/// Execute the `rk resolve` command.
pub fn run_resolve(ctx: &RuntimeContext, args: &BranchArgs) -> Result<()> {
    let branch = BranchRef::new(args.branch.clone(), args.remote.clone());
    report_value(
        ctx.json,
        "commit",
        ctx.client.fetch_commit(&branch),
        &format!("could not resolve branch '{branch}'"),
    )
}

/// Execute the `rk fetched-hash` command.
pub fn run_fetched_hash(ctx: &RuntimeContext) -> Result<()> {
    report_value(
        ctx.json,
        "commit",
        ctx.client.fetched_hash(),
        "FETCH_HEAD does not resolve (nothing fetched yet?)",
    )
}

/// Execute the `rk merge-base` command.
pub fn run_merge_base(ctx: &RuntimeContext, args: &MergeBaseArgs) -> Result<()> {
    report_value(
        ctx.json,
        "commit",
        ctx.client.most_recent_ancestor_commit(&args.a, &args.b),
        &format!("no merge base between '{}' and '{}'", args.a, args.b),
    )
}
