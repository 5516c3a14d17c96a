//! Output formatting helpers for the `rk` CLI.

use std::io::{self, Write};

use anyhow::{Result, bail};
use repokit_git::CommandResult;
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a line of text unless it is empty.
pub fn output_text(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

/// Print the outcome of a fire-and-forget git command and fail if it did.
pub fn report(json: bool, action: &str, result: &CommandResult) -> Result<()> {
    if json {
        output_json(&serde_json::json!({
            "action": action,
            "success": result.is_success(),
            "exit_code": result.error.as_ref().map(|e| e.code()),
            "output": result.trimmed(),
        }));
    } else {
        output_text(result.trimmed());
    }

    if let Some(err) = &result.error {
        bail!("{action} failed: {err}");
    }
    Ok(())
}

/// Print an optional value, failing with `missing` when absent.
pub fn report_value(json: bool, key: &str, value: Option<String>, missing: &str) -> Result<()> {
    let Some(value) = value else {
        bail!("{missing}");
    };
    if json {
        let mut map = serde_json::Map::new();
        map.insert(key.to_string(), serde_json::Value::String(value));
        output_json(&map);
    } else {
        println!("{}", value);
    }
    Ok(())
}
