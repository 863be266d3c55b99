//! Creation execution - effectful operations
//!
//! Submits one draft per repository, strictly in order. A failure in one
//! repository is recorded and the loop moves on.

use crate::config::Config;
use crate::platform::PullRequestService;
use crate::progress::ProgressCallback;
use crate::report::RepoFailure;
use crate::submit::draft::{CreateRequest, build_draft};
use crate::types::{CreatedPullRequest, PullRequestDraft};
use tracing::warn;

/// Options for a creation batch
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateOptions {
    /// Build drafts but do not submit them
    pub dry_run: bool,
}

/// A pull request created in one repository
#[derive(Debug, Clone)]
pub struct CreatedEntry {
    /// Repository slug
    pub repo: String,
    /// Server response
    pub pr: CreatedPullRequest,
}

/// Outcome of a creation batch
#[derive(Debug, Default)]
pub struct CreateReport {
    /// Successfully created pull requests
    pub created: Vec<CreatedEntry>,
    /// Drafts that were built but not submitted (dry run)
    pub planned: Vec<PullRequestDraft>,
    /// Repositories whose creation call failed
    pub failures: Vec<RepoFailure>,
}

impl CreateReport {
    /// Check if no repository failed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Create a pull request in every repository (EFFECTFUL)
///
/// Exactly one creation call is issued per repository, without retries.
pub async fn create_pull_requests(
    service: &dyn PullRequestService,
    config: &Config,
    repos: &[String],
    request: &CreateRequest,
    options: CreateOptions,
    progress: &dyn ProgressCallback,
) -> CreateReport {
    let mut report = CreateReport::default();

    for repo in repos {
        progress.on_repo_start(repo).await;
        let draft = build_draft(repo, request, config);

        if options.dry_run {
            progress
                .on_message(&format!(
                    "Would create PR '{}' ({} -> {}) with reviewers [{}]",
                    draft.title,
                    draft.source.branch,
                    draft.destination.branch,
                    draft.reviewers.join(", ")
                ))
                .await;
            report.planned.push(draft);
            continue;
        }

        match service.create_pr(&draft).await {
            Ok(pr) => {
                let url = pr.url.as_deref().unwrap_or("(no url)");
                progress
                    .on_success(&format!("PR #{} created in {repo}: {url}", pr.id))
                    .await;
                report.created.push(CreatedEntry {
                    repo: repo.clone(),
                    pr,
                });
            }
            Err(e) => {
                warn!(repo = %repo, error = %e, "failed to create PR");
                progress.on_error(repo, &e).await;
                report.failures.push(RepoFailure::new(repo.as_str(), e));
            }
        }
    }

    report
}
