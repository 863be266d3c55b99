//! Core types for pr-batch

/// Prefix of every fully qualified branch ref
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// A branch inside one repository of the configured project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Repository slug
    pub repo: String,
    /// Short branch name (e.g. `feature/login`)
    pub branch: String,
}

impl BranchRef {
    /// Create a branch reference
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Fully qualified ref path, e.g. `refs/heads/feature/login`
    pub fn ref_id(&self) -> String {
        qualified_ref(&self.branch)
    }
}

/// Qualify a short branch name as a `refs/heads/` path
pub fn qualified_ref(branch: &str) -> String {
    format!("{BRANCH_REF_PREFIX}{branch}")
}

/// A pull request to be created
///
/// Built once per target repository and submitted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    /// PR title
    pub title: String,
    /// PR description
    pub description: String,
    /// Work branch
    pub source: BranchRef,
    /// Integration branch
    pub destination: BranchRef,
    /// Reviewer usernames, in request order
    pub reviewers: Vec<String>,
}

/// An open pull request as reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Numeric PR id
    pub id: u64,
    /// Optimistic concurrency token required by merge
    pub version: i64,
    /// PR title
    pub title: String,
    /// Source branch display name
    pub source_branch: String,
    /// Destination branch display name
    pub destination_branch: String,
    /// Author username, when reported
    pub author: Option<String>,
    /// Web URL for the PR, when reported
    pub url: Option<String>,
}

/// Result of a successful creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// Numeric PR id
    pub id: u64,
    /// Version of the freshly created PR
    pub version: i64,
    /// Canonical web URL (first `self` link)
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_id_is_fully_qualified() {
        let r = BranchRef::new("billing", "feature/login");
        assert_eq!(r.ref_id(), "refs/heads/feature/login");
    }
}
