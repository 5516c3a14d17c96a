//! Configuration types and loading for repokit.
//!
//! The main entry point is [`RepokitConfig`]. Values are layered with
//! `figment`: built-in defaults, then a YAML file (normally
//! `<repo>/.repokit.yaml`), then `REPOKIT_*` environment variables using
//! `__` to separate nested keys (`REPOKIT_GIT__BINARY`,
//! `REPOKIT_HALT_ON_ERROR__STATUS`).

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use repokit_git::{HaltPolicies, HaltPolicy, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = ".repokit.yaml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "REPOKIT_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration layer could not be merged or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// The configuration could not be serialized to YAML.
    #[error("failed to write configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Git executable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSection {
    /// Path or name of the git binary.
    #[serde(default = "default_git_binary")]
    pub binary: String,
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            binary: default_git_binary(),
        }
    }
}

fn default_git_binary() -> String {
    repokit_git::client::DEFAULT_GIT_BINARY.to_string()
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSection {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"repokit_git=debug"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full repokit configuration.
///
/// Every field has a serde default, so a partial file is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepokitConfig {
    /// Git executable settings.
    #[serde(default)]
    pub git: GitSection,

    /// Per-operation halt overrides keyed by operation name
    /// (`status`, `reset`, `push`, ...). `true` halts on a non-zero exit.
    #[serde(default)]
    pub halt_on_error: BTreeMap<String, bool>,

    /// Logging settings.
    #[serde(default)]
    pub log: LogSection,
}

impl RepokitConfig {
    /// Build the halt policy table, applying overrides on top of the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a key that names no
    /// operation.
    pub fn halt_policies(&self) -> Result<HaltPolicies> {
        let mut policies = HaltPolicies::default();
        for (key, halt) in &self.halt_on_error {
            // Env keys arrive lowercased with underscores.
            let normalized = key.replace('_', "-");
            let op: Operation = normalized.parse().map_err(|_| ConfigError::InvalidValue {
                key: format!("halt_on_error.{key}"),
                reason: "not a known git operation".to_string(),
            })?;
            policies.set(op, HaltPolicy::from_halt_flag(*halt));
        }
        Ok(policies)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration for the repository at `repo_root`.
///
/// Reads `<repo_root>/.repokit.yaml` if present, then applies environment
/// overrides.
pub fn load_config(repo_root: &Path) -> Result<RepokitConfig> {
    load_config_file(&repo_root.join(CONFIG_FILE_NAME))
}

/// Load configuration from an explicit file path, then apply environment
/// overrides. A missing file contributes nothing.
pub fn load_config_file(path: &Path) -> Result<RepokitConfig> {
    let config: RepokitConfig = Figment::from(Serialized::defaults(RepokitConfig::default()))
        .merge(Yaml::file(path))
        .merge(env_overrides())
        .extract()?;
    Ok(config)
}

/// Load configuration from defaults and environment overrides only, for
/// callers that have no repository.
pub fn load_env_config() -> Result<RepokitConfig> {
    let config: RepokitConfig = Figment::from(Serialized::defaults(RepokitConfig::default()))
        .merge(env_overrides())
        .extract()?;
    Ok(config)
}

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Save configuration to `<repo_root>/.repokit.yaml`.
pub fn save_config(repo_root: &Path, config: &RepokitConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(repo_root.join(CONFIG_FILE_NAME), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
