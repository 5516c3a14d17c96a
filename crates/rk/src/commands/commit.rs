//! `rk stage`, `rk commit`, `rk push`.

use anyhow::Result;

use crate::cli::{CommitArgs, PushArgs};
use crate::context::RuntimeContext;
use crate::output::report;

/// Execute the `rk stage` command.
pub fn run_stage(ctx: &RuntimeContext) -> Result<()> {
    report(ctx.json, "stage", &ctx.client.stage_all_changes())
}

/// Execute the `rk commit` command.
pub fn run_commit(ctx: &RuntimeContext, args: &CommitArgs) -> Result<()> {
    if args.all {
        ctx.client.stage_all_changes();
    }
    report(ctx.json, "commit", &ctx.client.commit(&args.message))
}

/// Execute the `rk push` command.
pub fn run_push(ctx: &RuntimeContext, args: &PushArgs) -> Result<()> {
    let result = ctx
        .client
        .push(&args.source, &args.target, &args.remote, args.force);
    report(ctx.json, "push", &result)
}
