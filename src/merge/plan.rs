//! Merge planning - pure functions for picking pull requests to merge
//!
//! This module contains the pure, testable matching logic. The open pull
//! requests are fetched beforehand and passed in.

use crate::config::{AUTO_PR_USERNAME, Config};
use crate::error::{Error, Result};
use crate::types::PullRequest;

/// A pull request selected for merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTarget {
    /// PR id
    pub pr_id: u64,
    /// Version token fetched with the PR
    pub version: i64,
    /// PR title (for display)
    pub title: String,
    /// Source branch of the PR
    pub source_branch: String,
    /// Delete the source branch after a successful merge
    pub delete_source: bool,
}

impl MergeTarget {
    fn from_pr(pr: &PullRequest, delete_source: bool) -> Self {
        Self {
            pr_id: pr.id,
            version: pr.version,
            title: pr.title.clone(),
            source_branch: pr.source_branch.clone(),
            delete_source,
        }
    }
}

impl std::fmt::Display for MergeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "merge PR #{}", self.pr_id)?;
        if !self.title.is_empty() {
            write!(f, ": {}", self.title)?;
        }
        if self.delete_source {
            write!(f, " (then delete {})", self.source_branch)?;
        }
        Ok(())
    }
}

/// Which pull requests count as automation pull requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationCriteria {
    /// Fixed source branch of automation PRs
    pub source_branch: String,
    /// Destination branch
    pub destination_branch: String,
    /// Author username of the automation identity
    pub author: String,
}

impl AutomationCriteria {
    /// Criteria from the run configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let author = config
            .automation_user
            .clone()
            .ok_or_else(|| Error::MissingConfig(vec![AUTO_PR_USERNAME.to_string()]))?;
        Ok(Self {
            source_branch: config.automation_branch.clone(),
            destination_branch: config.destination_branch.clone(),
            author,
        })
    }

    fn matches(&self, pr: &PullRequest) -> bool {
        pr.author.as_deref() == Some(self.author.as_str())
            && pr.source_branch == self.source_branch
            && pr.destination_branch == self.destination_branch
    }
}

/// Select the single open PR from `source_branch` to `destination_branch`
///
/// Display names must match exactly. No match and more than one match are
/// both errors; nothing is picked by listing order.
pub fn plan_branch_merge(
    prs: &[PullRequest],
    source_branch: &str,
    destination_branch: &str,
) -> Result<MergeTarget> {
    let matches: Vec<&PullRequest> = prs
        .iter()
        .filter(|pr| pr.source_branch == source_branch && pr.destination_branch == destination_branch)
        .collect();

    match matches.as_slice() {
        [] => Err(Error::NoMatchingPullRequest {
            source_branch: source_branch.to_string(),
            destination_branch: destination_branch.to_string(),
        }),
        [pr] => Ok(MergeTarget::from_pr(pr, true)),
        many => Err(Error::AmbiguousPullRequest {
            source_branch: source_branch.to_string(),
            destination_branch: destination_branch.to_string(),
            ids: many.iter().map(|pr| pr.id).collect(),
        }),
    }
}

/// Select every automation PR, in listing order
///
/// The shared source branch is long-lived, so it is never deleted.
pub fn plan_automatic_merges(prs: &[PullRequest], criteria: &AutomationCriteria) -> Vec<MergeTarget> {
    prs.iter()
        .filter(|pr| criteria.matches(pr))
        .map(|pr| MergeTarget::from_pr(pr, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(id: u64, source: &str, destination: &str, author: &str) -> PullRequest {
        PullRequest {
            id,
            version: i64::try_from(id).unwrap() * 10,
            title: format!("PR {id}"),
            source_branch: source.to_string(),
            destination_branch: destination.to_string(),
            author: Some(author.to_string()),
            url: None,
        }
    }

    #[test]
    fn test_selects_exact_pair() {
        let prs = vec![
            pr(1, "feature/login", "master", "alice"),
            pr(2, "feature/login", "develop", "alice"),
            pr(3, "feature/login-v2", "develop", "bob"),
        ];
        let target = plan_branch_merge(&prs, "feature/login", "develop").unwrap();

        assert_eq!(target.pr_id, 2);
        assert_eq!(target.version, 20);
        assert!(target.delete_source);
        assert_eq!(target.source_branch, "feature/login");
    }

    #[test]
    fn test_no_match_is_reported() {
        let prs = vec![pr(1, "feature/other", "develop", "alice")];
        let err = plan_branch_merge(&prs, "feature/login", "develop").unwrap_err();

        assert!(matches!(err, Error::NoMatchingPullRequest { .. }));
        assert!(!err.is_config());
    }

    #[test]
    fn test_multiple_matches_are_ambiguous() {
        let prs = vec![
            pr(4, "feature/login", "develop", "alice"),
            pr(9, "feature/login", "develop", "bob"),
        ];
        match plan_branch_merge(&prs, "feature/login", "develop") {
            Err(Error::AmbiguousPullRequest { ids, .. }) => assert_eq!(ids, vec![4, 9]),
            other => panic!("expected AmbiguousPullRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_automatic_filters_by_author_and_branches() {
        let criteria = AutomationCriteria {
            source_branch: "master".to_string(),
            destination_branch: "develop".to_string(),
            author: "release-bot".to_string(),
        };
        let prs = vec![
            pr(1, "master", "develop", "release-bot"),
            pr(2, "master", "develop", "alice"),
            pr(3, "feature/x", "develop", "release-bot"),
            pr(4, "master", "release", "release-bot"),
            pr(5, "master", "develop", "release-bot"),
        ];

        let targets = plan_automatic_merges(&prs, &criteria);
        let ids: Vec<u64> = targets.iter().map(|t| t.pr_id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert!(targets.iter().all(|t| !t.delete_source));
    }

    #[test]
    fn test_automatic_ignores_prs_without_author() {
        let criteria = AutomationCriteria {
            source_branch: "master".to_string(),
            destination_branch: "develop".to_string(),
            author: "release-bot".to_string(),
        };
        let mut anonymous = pr(1, "master", "develop", "release-bot");
        anonymous.author = None;

        assert!(plan_automatic_merges(&[anonymous], &criteria).is_empty());
    }

    #[test]
    fn test_display() {
        let target = MergeTarget {
            pr_id: 7,
            version: 1,
            title: "login".to_string(),
            source_branch: "feature/login".to_string(),
            delete_source: true,
        };
        assert_eq!(target.to_string(), "merge PR #7: login (then delete feature/login)");
    }

    #[test]
    fn test_criteria_require_automation_user() {
        let vars: std::collections::HashMap<String, String> = [
            ("BITBUCKET_BASE_URL", "https://bitbucket.example.com"),
            ("BITBUCKET_USERNAME", "ci-bot"),
            ("BITBUCKET_PASSWORD", "secret"),
            ("BITBUCKET_PROJECT_KEY", "SHOP"),
            ("DESTINATION_BRANCH", "develop"),
            ("DEFAULT_REPO_SLUGS", "cart"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let config = Config::from_vars(&vars, crate::config::Mode::Merge).unwrap();

        let err = AutomationCriteria::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::MissingConfig(names) if names == vec![AUTO_PR_USERNAME.to_string()]));
    }
}
