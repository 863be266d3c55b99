//! Remote pull request service
//!
//! Abstracts the hosting server's REST API so the batch workflows can be
//! driven by a real server or a test double.

mod bitbucket;

pub use bitbucket::BitbucketService;

use crate::error::Result;
use crate::types::{CreatedPullRequest, PullRequest, PullRequestDraft};
use async_trait::async_trait;

/// Pull request operations used by the batch workflows
///
/// Every call is one-shot: implementations must not retry.
#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Submit a new pull request
    async fn create_pr(&self, draft: &PullRequestDraft) -> Result<CreatedPullRequest>;

    /// List every open pull request of a repository
    ///
    /// The returned records carry the current `version` token.
    async fn list_open_prs(&self, repo: &str) -> Result<Vec<PullRequest>>;

    /// Merge a pull request using the most recently fetched `version`
    async fn merge_pr(&self, repo: &str, pr_id: u64, version: i64) -> Result<()>;

    /// Delete a branch of a repository
    async fn delete_branch(&self, repo: &str, branch: &str) -> Result<()>;
}
