//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by create, merge and merge-auto.

use pr_batch::config::{Config, EnvSource, Mode, collect_vars};
use pr_batch::error::{Error, Result};
use pr_batch::platform::{BitbucketService, PullRequestService};
use pr_batch::targets::{RepoSelector, resolve_targets};

/// Shared context for CLI commands that talk to the server
///
/// Everything here is built before the first network call, so any
/// configuration problem surfaces before the batch starts.
pub struct CommandContext {
    /// Immutable run configuration
    pub config: Config,
    /// Resolved target repositories, in order
    pub repos: Vec<String>,
    /// Server client
    pub service: Box<dyn PullRequestService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Read the env profile and process environment
    /// - Build and validate the configuration for `mode`
    /// - Resolve the target repositories
    /// - Create the server client
    pub fn new(env: &EnvSource, mode: Mode, selector: &RepoSelector) -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::EnvProfile(format!("cannot determine working directory: {e}")))?;

        // Non-UTF-8 variables can never be ours; skip them.
        let process_env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));

        let vars = collect_vars(&cwd, env, process_env)?;
        let config = Config::from_vars(&vars, mode)?;
        let repos = resolve_targets(selector, &config)?;
        let service = Box::new(BitbucketService::from_config(&config)?);

        Ok(Self {
            config,
            repos,
            service,
        })
    }
}
