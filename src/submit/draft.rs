//! Draft building - pure functions
//!
//! No I/O happens here; the drafts are submitted by `execute`.

use crate::config::Config;
use crate::types::{BranchRef, PullRequestDraft};

/// Branch type prefixes removed from default titles, in priority order
pub const BRANCH_TYPE_PREFIXES: [&str; 3] = ["feature/", "hotfix/", "bugfix/"];

/// What to create in every target repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Work branch to open the PR from
    pub source_branch: String,
    /// Explicit title; derived from the branch name when `None`
    pub title: Option<String>,
    /// Reviewer usernames
    pub reviewers: Vec<String>,
}

/// Remove the first matching branch type prefix
///
/// Only the first prefix in [`BRANCH_TYPE_PREFIXES`] that the name starts
/// with is considered, and only its first occurrence is removed. Names
/// without a known prefix pass through unchanged.
pub fn strip_branch_prefix(branch: &str) -> String {
    BRANCH_TYPE_PREFIXES
        .iter()
        .find(|prefix| branch.starts_with(*prefix))
        .map_or_else(|| branch.to_string(), |prefix| branch.replacen(prefix, "", 1))
}

/// Title for a new PR: the explicit one if non-empty, else the stripped branch name
pub fn resolve_title(source_branch: &str, explicit: Option<&str>) -> String {
    explicit
        .filter(|t| !t.trim().is_empty())
        .map_or_else(|| strip_branch_prefix(source_branch), String::from)
}

/// Build the draft for one repository
pub fn build_draft(repo: &str, request: &CreateRequest, config: &Config) -> PullRequestDraft {
    PullRequestDraft {
        title: resolve_title(&request.source_branch, request.title.as_deref()),
        description: config.description.clone(),
        source: BranchRef::new(repo, request.source_branch.as_str()),
        destination: BranchRef::new(repo, config.destination_branch.as_str()),
        reviewers: request.reviewers.clone(),
    }
}
