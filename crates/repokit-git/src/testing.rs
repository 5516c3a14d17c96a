//! Scripted [`CommandRunner`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::commands::{CommandResult, CommandRunner};

/// Number of leading arguments `RepoClient` adds before the subcommand:
/// program, `--git-dir`, path, `--work-tree`, path.
const GLOBAL_ARGS: usize = 5;

/// Replays queued results in order and records every argument vector.
///
/// Once the queue is empty every call succeeds with empty output.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    replies: Mutex<VecDeque<CommandResult>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub(crate) fn new(replies: impl IntoIterator<Item = CommandResult>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::default(),
        }
    }

    /// Full argument vectors, in call order.
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Argument vectors with the global prefix stripped, joined by spaces.
    pub(crate) fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|args| args[GLOBAL_ARGS.min(args.len())..].join(" "))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, args: &[String]) -> CommandResult {
        self.calls.lock().unwrap().push(args.to_vec());
        self.replies.lock().unwrap().pop_front().unwrap_or_default()
    }
}
