//! `rk add-remote` -- create or repoint a remote.

use anyhow::Result;

use crate::cli::AddRemoteArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `rk add-remote` command.
///
/// Always succeeds: one of the two underlying git commands is expected to
/// fail.
pub fn run(ctx: &RuntimeContext, args: &AddRemoteArgs) -> Result<()> {
    ctx.client.add_remote(&args.name, &args.url);

    if ctx.json {
        output_json(&serde_json::json!({
            "remote": args.name,
            "url": args.url,
        }));
    } else {
        println!("{} -> {}", args.name, args.url);
    }
    Ok(())
}
