//! Run configuration
//!
//! Configuration is read once into an immutable [`Config`] and passed to every
//! operation. Values come from a plain variable map so nothing downstream
//! touches the process environment.

mod profile;

pub use profile::{EnvSource, collect_vars, load_env_file, profile_path};

use crate::auth::Credentials;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// Bitbucket Server root URL, e.g. `https://bitbucket.example.com`
pub const BASE_URL: &str = "BITBUCKET_BASE_URL";
/// Account used for every API call
pub const USERNAME: &str = "BITBUCKET_USERNAME";
/// Password or HTTP access token for [`USERNAME`]
pub const PASSWORD: &str = "BITBUCKET_PASSWORD";
/// Project key owning the repositories
pub const PROJECT_KEY: &str = "BITBUCKET_PROJECT_KEY";
/// Integration branch every PR targets
pub const DESTINATION_BRANCH: &str = "DESTINATION_BRANCH";
/// Fallback repository list
pub const DEFAULT_REPO_SLUGS: &str = "DEFAULT_REPO_SLUGS";
/// Reviewer candidate pool
pub const POSSIBLE_REVIEWERS: &str = "POSSIBLE_REVIEWERS";
/// Number of randomly selected reviewers
pub const MIN_NUMBER_OF_REVIEWERS: &str = "MIN_NUMBER_OF_REVIEWERS";
/// Library repository group
pub const LIB_REPOS: &str = "LIB_REPOS";
/// Author of automation pull requests
pub const AUTO_PR_USERNAME: &str = "AUTO_PR_USERNAME";
/// Source branch of automation pull requests
pub const AUTO_PR_SOURCE_BRANCH: &str = "AUTO_PR_SOURCE_BRANCH";
/// Description attached to created pull requests
pub const PR_DESCRIPTION: &str = "PR_DESCRIPTION";

/// Suffix marking a repository group variable (`BE4FE_REPOS` -> group `be4fe`)
const GROUP_SUFFIX: &str = "_REPOS";

/// Group name selected by `--lib`
pub const LIB_GROUP: &str = "lib";

const DEFAULT_MIN_REVIEWERS: usize = 2;
const DEFAULT_AUTOMATION_BRANCH: &str = "master";
const DEFAULT_DESCRIPTION: &str = "PR created using bitbucket APIs";

/// Which command the configuration is loaded for
///
/// Each command needs a different set of variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create pull requests
    Create {
        /// Reviewers will be drawn from the candidate pool
        random_reviewers: bool,
    },
    /// Merge the pull request for one source branch
    Merge,
    /// Merge every pull request opened by the automation user
    MergeAutomatic {
        /// No selector was given, so `LIB_REPOS` supplies the targets
        default_targets: bool,
    },
}

impl Mode {
    /// Variables that must be set and non-empty
    pub fn required_vars(self) -> Vec<&'static str> {
        let mut vars = vec![BASE_URL, USERNAME, PASSWORD, PROJECT_KEY, DESTINATION_BRANCH];
        match self {
            Self::Create { random_reviewers } => {
                vars.push(DEFAULT_REPO_SLUGS);
                if random_reviewers {
                    vars.push(POSSIBLE_REVIEWERS);
                }
            }
            Self::Merge => vars.push(DEFAULT_REPO_SLUGS),
            Self::MergeAutomatic { default_targets } => {
                if default_targets {
                    vars.push(LIB_REPOS);
                }
                vars.push(AUTO_PR_USERNAME);
            }
        }
        vars
    }
}

/// Immutable configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Server root URL
    pub base_url: Url,
    /// API credentials
    pub credentials: Credentials,
    /// Project key owning every target repository
    pub project_key: String,
    /// Integration branch
    pub destination_branch: String,
    /// Repositories used when no selector is given
    pub default_repos: Vec<String>,
    /// Named repository groups, keyed by lowercase group name
    pub repo_groups: BTreeMap<String, Vec<String>>,
    /// Reviewer candidate pool
    pub reviewer_pool: Vec<String>,
    /// Number of reviewers to draw from the pool
    pub min_reviewers: usize,
    /// Automation identity for `merge-auto`
    pub automation_user: Option<String>,
    /// Source branch of automation pull requests
    pub automation_branch: String,
    /// Description for created pull requests
    pub description: String,
}

impl Config {
    /// Build the configuration from a variable map
    ///
    /// Every missing variable is reported at once.
    pub fn from_vars(vars: &HashMap<String, String>, mode: Mode) -> Result<Self> {
        let missing: Vec<String> = mode
            .required_vars()
            .into_iter()
            .filter(|key| lookup(vars, key).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingConfig(missing));
        }

        let required = |key: &str| lookup(vars, key).unwrap_or_default().to_string();

        let base_url = parse_base_url(&required(BASE_URL))?;
        // Only random selection reads the count.
        let min_reviewers = match (mode, lookup(vars, MIN_NUMBER_OF_REVIEWERS)) {
            (Mode::Create { random_reviewers: true }, Some(raw)) => parse_reviewer_count(raw)?,
            _ => DEFAULT_MIN_REVIEWERS,
        };

        let repo_groups = collect_groups(vars);
        let default_repos = match mode {
            Mode::MergeAutomatic { .. } => repo_groups.get(LIB_GROUP).cloned().unwrap_or_default(),
            Mode::Create { .. } | Mode::Merge => {
                split_list(lookup(vars, DEFAULT_REPO_SLUGS).unwrap_or_default())
            }
        };

        Ok(Self {
            base_url,
            credentials: Credentials::new(required(USERNAME), required(PASSWORD)),
            project_key: required(PROJECT_KEY),
            destination_branch: required(DESTINATION_BRANCH),
            default_repos,
            repo_groups,
            reviewer_pool: split_list(lookup(vars, POSSIBLE_REVIEWERS).unwrap_or_default()),
            min_reviewers,
            automation_user: lookup(vars, AUTO_PR_USERNAME).map(String::from),
            automation_branch: lookup(vars, AUTO_PR_SOURCE_BRANCH)
                .unwrap_or(DEFAULT_AUTOMATION_BRANCH)
                .to_string(),
            description: lookup(vars, PR_DESCRIPTION)
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
        })
    }

    /// Repositories of a named group, if configured
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.repo_groups
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }
}

/// Split a comma-separated list, trimming items and dropping empty ones
///
/// Order and duplicates are preserved.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidConfig {
        name: BASE_URL.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidConfig {
            name: BASE_URL.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_reviewer_count(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidConfig {
            name: MIN_NUMBER_OF_REVIEWERS.to_string(),
            reason: format!("expected a positive integer, got '{raw}'"),
        }),
    }
}

fn collect_groups(vars: &HashMap<String, String>) -> BTreeMap<String, Vec<String>> {
    vars.iter()
        .filter_map(|(key, value)| {
            let name = key.strip_suffix(GROUP_SUFFIX)?;
            if name.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), split_list(value)))
        })
        .collect()
}
