//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: a configured
//! [`RepoClient`] and the global output flags.

use std::env;

use anyhow::{Context, Result};
use repokit_config::{RepokitConfig, load_config, load_config_file};
use repokit_git::RepoClient;
use repokit_git::discover::discover_repo_root;

use crate::cli::GlobalArgs;

/// Filter installed by `--verbose`.
pub const VERBOSE_FILTER: &str = "rk=debug,repokit_git=debug";

/// Runtime context passed to every repository command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Client bound to the target repository.
    pub client: RepoClient,

    /// The loaded configuration.
    pub config: RepokitConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The repository is `--repo` if given, otherwise the nearest ancestor of
    /// the current directory that contains `.git`. Configuration comes from
    /// `--config` or `<repo>/.repokit.yaml`, plus `REPOKIT_*` overrides.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let repo = match &global.repo {
            Some(path) => path.clone(),
            None => {
                let cwd = env::current_dir().context("failed to read current directory")?;
                discover_repo_root(&cwd).with_context(|| {
                    format!("not a git repository (or any parent): {}", cwd.display())
                })?
            }
        };

        let config = match &global.config {
            Some(path) => load_config_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => load_config(&repo)?,
        };
        let policies = config.halt_policies()?;

        let client = RepoClient::new(repo)
            .with_git_binary(config.git.binary.clone())
            .with_policies(policies);

        Ok(Self {
            client,
            config,
            json: global.json,
            verbose: global.verbose,
        })
    }

    /// The configured `tracing` filter, if one should be installed now.
    ///
    /// Under `--verbose` the subscriber is already running before the
    /// context is built, so the configured `log.filter` is ignored.
    pub fn log_filter(&self) -> Option<&str> {
        if self.verbose {
            None
        } else {
            self.config.log.filter.as_deref()
        }
    }
}
