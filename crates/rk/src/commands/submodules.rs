//! `rk submodules` and `rk foreach-status`.

use anyhow::Result;
use repokit_git::{BranchRef, SubmoduleEntry};
use serde::Serialize;

use crate::cli::SubmodulesArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// JSON view of a [`SubmoduleEntry`].
#[derive(Serialize)]
struct SubmoduleView {
    path: String,
    commit: String,
}

impl From<&SubmoduleEntry> for SubmoduleView {
    fn from(entry: &SubmoduleEntry) -> Self {
        Self {
            path: entry.client.repo_path().display().to_string(),
            commit: entry.commit.clone(),
        }
    }
}

/// Execute the `rk submodules` command.
pub fn run_list(ctx: &RuntimeContext, args: &SubmodulesArgs) -> Result<()> {
    let entries = if args.branch {
        let branch = BranchRef::new(args.reference.clone(), args.remote.clone());
        ctx.client.submodule_states_for_branch(&branch)
    } else {
        ctx.client.submodule_states(&args.reference)
    };

    if ctx.json {
        let views: Vec<SubmoduleView> = entries.iter().map(SubmoduleView::from).collect();
        output_json(&views);
    } else {
        for entry in &entries {
            println!("{} {}", entry.commit, entry.client.repo_path().display());
        }
    }
    Ok(())
}

/// JSON view of one repository's status.
#[derive(Serialize)]
struct StatusView {
    path: String,
    status: String,
}

/// Execute the `rk foreach-status` command.
pub fn run_foreach_status(ctx: &RuntimeContext) -> Result<()> {
    let mut statuses = Vec::new();
    ctx.client.perform_repo_and_submodule_action(|repo| {
        statuses.push(StatusView {
            path: repo.repo_path().display().to_string(),
            status: repo.status_message(),
        });
    });

    if ctx.json {
        output_json(&statuses);
    } else {
        for view in &statuses {
            println!("== {}", view.path);
            println!("{}", view.status);
        }
    }
    Ok(())
}
