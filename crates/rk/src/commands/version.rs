//! `rk version` -- print the rk version and the git it drives.

use std::env;

use anyhow::Result;
use repokit_config::{RepokitConfig, load_config, load_config_file, load_env_config};
use repokit_git::discover::discover_repo_root;
use repokit_git::{CommandRunner, SystemRunner};
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::output::output_json;

/// Version string. Set at compile time via Cargo.toml (workspace version).
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute the `rk version` command.
///
/// Works outside a repository: the configured git binary then comes from
/// `--config` or the environment alone.
pub fn run(global: &GlobalArgs) -> Result<()> {
    let binary = configured_git_binary(global);
    let git_version = SystemRunner.run(&[binary.clone(), "--version".to_string()]).value();

    if global.json {
        output_json(&serde_json::json!({
            "version": VERSION,
            "os": env::consts::OS,
            "arch": env::consts::ARCH,
            "git_binary": binary,
            "git_version": git_version,
        }));
    } else {
        println!("rk version {} {}/{}", VERSION, env::consts::OS, env::consts::ARCH);
        match git_version {
            Some(v) => println!("git binary {binary}: {v}"),
            None => println!("git binary {binary}: not runnable"),
        }
    }

    Ok(())
}

/// The git binary the configuration would select for the current directory.
fn configured_git_binary(global: &GlobalArgs) -> String {
    let loaded = match (&global.config, &global.repo) {
        (Some(path), _) => load_config_file(path),
        (None, Some(repo)) => load_config(repo),
        (None, None) => {
            let root = env::current_dir().ok().and_then(|cwd| discover_repo_root(&cwd));
            match root {
                Some(root) => load_config(&root),
                None => load_env_config(),
            }
        }
    };
    match loaded {
        Ok(config) => config.git.binary,
        Err(e) => {
            debug!(error = %e, "falling back to default git binary");
            RepokitConfig::default().git.binary
        }
    }
}
