//! Merge execution - effectful operations
//!
//! Lists open pull requests, runs the pure planning functions over them and
//! performs the merges. Repositories are processed one after another and a
//! failure in one never stops the others.

use crate::error::Error;
use crate::merge::plan::{AutomationCriteria, MergeTarget, plan_automatic_merges, plan_branch_merge};
use crate::platform::PullRequestService;
use crate::progress::ProgressCallback;
use crate::report::RepoFailure;
use tracing::warn;

/// Options for a merge batch
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Show what would be merged without merging
    pub dry_run: bool,
}

/// A pull request merged in one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    /// Repository slug
    pub repo: String,
    /// Merged PR id
    pub pr_id: u64,
    /// Whether the source branch was deleted afterwards
    pub branch_deleted: bool,
}

/// Outcome of a merge batch
#[derive(Debug, Default)]
pub struct MergeReport {
    /// Pull requests merged
    pub merged: Vec<MergedEntry>,
    /// Merges that would have been performed (dry run)
    pub planned: Vec<(String, MergeTarget)>,
    /// Repositories or PRs that could not be merged
    pub failures: Vec<RepoFailure>,
    /// Merged PRs whose source branch could not be deleted
    pub branch_failures: Vec<RepoFailure>,
}

impl MergeReport {
    /// Check if every step succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty() && self.branch_failures.is_empty()
    }
}

/// Merge the open PR from `source_branch` to `destination_branch` in every
/// repository, then delete its source branch (EFFECTFUL)
pub async fn merge_matching_pull_requests(
    service: &dyn PullRequestService,
    repos: &[String],
    source_branch: &str,
    destination_branch: &str,
    options: MergeOptions,
    progress: &dyn ProgressCallback,
) -> MergeReport {
    let mut report = MergeReport::default();

    for repo in repos {
        progress.on_repo_start(repo).await;

        let planned = service
            .list_open_prs(repo)
            .await
            .and_then(|prs| plan_branch_merge(&prs, source_branch, destination_branch));

        match planned {
            Ok(target) => execute_target(service, repo, target, options, progress, &mut report).await,
            Err(e) => record_failure(repo, e, progress, &mut report).await,
        }
    }

    report
}

/// Merge every automation PR in every repository (EFFECTFUL)
///
/// Each qualifying PR is merged independently; zero matches is not an error.
pub async fn merge_automatic_pull_requests(
    service: &dyn PullRequestService,
    repos: &[String],
    criteria: &AutomationCriteria,
    options: MergeOptions,
    progress: &dyn ProgressCallback,
) -> MergeReport {
    let mut report = MergeReport::default();

    for repo in repos {
        progress.on_repo_start(repo).await;

        let prs = match service.list_open_prs(repo).await {
            Ok(prs) => prs,
            Err(e) => {
                record_failure(repo, e, progress, &mut report).await;
                continue;
            }
        };

        let targets = plan_automatic_merges(&prs, criteria);
        if targets.is_empty() {
            progress
                .on_message(&format!(
                    "No automatic PRs from {} by {}",
                    criteria.source_branch, criteria.author
                ))
                .await;
            continue;
        }

        for target in targets {
            execute_target(service, repo, target, options, progress, &mut report).await;
        }
    }

    report
}

async fn record_failure(
    repo: &str,
    error: Error,
    progress: &dyn ProgressCallback,
    report: &mut MergeReport,
) {
    warn!(repo, error = %error, "merge skipped");
    progress.on_error(repo, &error).await;
    report.failures.push(RepoFailure::new(repo, error));
}

async fn execute_target(
    service: &dyn PullRequestService,
    repo: &str,
    target: MergeTarget,
    options: MergeOptions,
    progress: &dyn ProgressCallback,
    report: &mut MergeReport,
) {
    if options.dry_run {
        progress.on_message(&format!("Would {target}")).await;
        report.planned.push((repo.to_string(), target));
        return;
    }

    if let Err(e) = service.merge_pr(repo, target.pr_id, target.version).await {
        warn!(repo, pr_id = target.pr_id, error = %e, "merge failed");
        progress.on_error(repo, &e).await;
        report.failures.push(RepoFailure::new(repo, e));
        return;
    }
    progress
        .on_success(&format!("PR #{} merged in {repo}", target.pr_id))
        .await;

    let mut entry = MergedEntry {
        repo: repo.to_string(),
        pr_id: target.pr_id,
        branch_deleted: false,
    };

    if target.delete_source {
        match service.delete_branch(repo, &target.source_branch).await {
            Ok(()) => {
                progress
                    .on_success(&format!("Source branch '{}' deleted", target.source_branch))
                    .await;
                entry.branch_deleted = true;
            }
            Err(e) => {
                // The merge stays in place.
                warn!(repo, branch = %target.source_branch, error = %e, "branch deletion failed");
                progress.on_error(repo, &e).await;
                report.branch_failures.push(RepoFailure::new(repo, e));
            }
        }
    }

    report.merged.push(entry);
}
