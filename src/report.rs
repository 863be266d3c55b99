//! Per-repository failure records shared by the batch workflows

use crate::error::Error;

/// A repository whose processing failed
///
/// Failures never stop the batch; they are collected here instead.
#[derive(Debug)]
pub struct RepoFailure {
    /// Repository slug
    pub repo: String,
    /// What went wrong
    pub error: Error,
}

impl RepoFailure {
    /// Record a failure for `repo`
    pub fn new(repo: impl Into<String>, error: Error) -> Self {
        Self {
            repo: repo.into(),
            error,
        }
    }
}
