//! `rk status`, `rk last-commit`, `rk diff`.
//!
//! These halt the process on git failure unless configured otherwise.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{output_json, output_text};

fn emit(ctx: &RuntimeContext, key: &str, text: String) {
    if ctx.json {
        let mut map = serde_json::Map::new();
        map.insert(key.to_string(), serde_json::Value::String(text));
        output_json(&map);
    } else {
        output_text(&text);
    }
}

/// Execute the `rk status` command.
pub fn run_status(ctx: &RuntimeContext) -> Result<()> {
    emit(ctx, "status", ctx.client.status_message());
    Ok(())
}

/// Execute the `rk last-commit` command.
pub fn run_last_commit(ctx: &RuntimeContext) -> Result<()> {
    emit(ctx, "commit", ctx.client.last_commit_message());
    Ok(())
}

/// Execute the `rk diff` command.
pub fn run_diff(ctx: &RuntimeContext) -> Result<()> {
    emit(ctx, "diff", ctx.client.current_diff());
    Ok(())
}
