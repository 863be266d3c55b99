//! Repository target resolution
//!
//! Picks the working set of repositories for a run from exactly one
//! selector. Rejecting conflicting selectors is the CLI's job; by the time a
//! [`RepoSelector`] exists only one source can be expressed.

use crate::config::{Config, LIB_GROUP};
use crate::error::{Error, Result};

/// Source of the repository list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSelector {
    /// Explicit repository slugs
    Explicit(Vec<String>),
    /// A named `<GROUP>_REPOS` group
    Group(String),
    /// The library group (`LIB_REPOS`)
    Library,
    /// The command's default list
    Default,
}

impl RepoSelector {
    /// Build a selector from CLI-style options; explicit list wins over
    /// group, group over library flag
    pub fn from_options(repos: Option<Vec<String>>, group: Option<String>, lib: bool) -> Self {
        match (repos, group) {
            (Some(repos), _) => Self::Explicit(repos),
            (None, Some(group)) => Self::Group(group),
            (None, None) if lib => Self::Library,
            (None, None) => Self::Default,
        }
    }
}

/// Resolve the ordered list of repositories to operate on
///
/// Duplicates are kept and an empty list is a valid (no-op) result.
pub fn resolve_targets(selector: &RepoSelector, config: &Config) -> Result<Vec<String>> {
    match selector {
        RepoSelector::Explicit(repos) => Ok(repos.clone()),
        RepoSelector::Group(name) => config
            .group(name)
            .map(<[String]>::to_vec)
            .ok_or_else(|| Error::UnknownGroup(name.clone())),
        RepoSelector::Library => config
            .group(LIB_GROUP)
            .map(<[String]>::to_vec)
            .ok_or_else(|| Error::UnknownGroup(LIB_GROUP.to_string())),
        RepoSelector::Default => Ok(config.default_repos.clone()),
    }
}
