//! Error types for pr-batch

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while configuring or running a batch
#[derive(Debug, Error)]
pub enum Error {
    /// One or more required configuration variables are unset or empty
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    /// A configuration variable is present but unusable
    #[error("invalid value for {name}: {reason}")]
    InvalidConfig {
        /// Variable name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The reviewer pool is too small for random selection
    #[error("need {required} distinct reviewer candidates, but only {available} configured")]
    NotEnoughReviewers {
        /// Reviewers requested
        required: usize,
        /// Distinct candidates in the pool
        available: usize,
    },

    /// A `--group` selector names a group with no `<GROUP>_REPOS` variable
    #[error("unknown repository group '{0}'")]
    UnknownGroup(String),

    /// An explicitly requested env profile could not be loaded
    #[error("failed to load env profile: {0}")]
    EnvProfile(String),

    /// The server answered with a non-success status
    #[error("request rejected: {status} {reason}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Canonical status text
        reason: String,
        /// Response payload as returned by the server
        body: String,
    },

    /// No response was received (DNS, connection refused, TLS, ...)
    #[error("no response from server: {0}")]
    Transport(String),

    /// A success response could not be decoded
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// No open pull request matches the requested branches
    #[error("no open pull request from '{source_branch}' to '{destination_branch}'")]
    NoMatchingPullRequest {
        /// Requested source branch
        source_branch: String,
        /// Requested destination branch
        destination_branch: String,
    },

    /// More than one open pull request matches the requested branches
    #[error(
        "{} open pull requests from '{source_branch}' to '{destination_branch}' (ids: {})",
        .ids.len(),
        .ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    AmbiguousPullRequest {
        /// Requested source branch
        source_branch: String,
        /// Requested destination branch
        destination_branch: String,
        /// Ids of every matching pull request
        ids: Vec<u64>,
    },
}

impl Error {
    /// Whether this error must stop the run before any network activity
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingConfig(_)
                | Self::InvalidConfig { .. }
                | Self::NotEnoughReviewers { .. }
                | Self::UnknownGroup(_)
                | Self::EnvProfile(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::UnexpectedResponse(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
