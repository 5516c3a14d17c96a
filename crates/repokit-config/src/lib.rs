//! Configuration management for repokit.
//!
//! Loads `.repokit.yaml` from a repository root, layers `REPOKIT_*`
//! environment overrides on top, and turns the result into the settings a
//! [`RepoClient`](repokit_git::RepoClient) needs.

pub mod config;

pub use config::{
    ConfigError, RepokitConfig, load_config, load_config_file, load_env_config, save_config,
};
