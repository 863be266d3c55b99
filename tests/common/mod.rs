//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_service;

pub use mock_service::{DeleteBranchCall, Failure, MergeCall, MockPullRequestService};

use pr_batch::config::{Config, Mode};
use pr_batch::types::PullRequest;
use std::collections::HashMap;

/// Variables for a complete configuration
pub fn test_vars() -> HashMap<String, String> {
    [
        ("BITBUCKET_BASE_URL", "https://bitbucket.example.com"),
        ("BITBUCKET_USERNAME", "ci-bot"),
        ("BITBUCKET_PASSWORD", "secret"),
        ("BITBUCKET_PROJECT_KEY", "SHOP"),
        ("DESTINATION_BRANCH", "develop"),
        ("DEFAULT_REPO_SLUGS", "cart,checkout"),
        ("POSSIBLE_REVIEWERS", "alice,bob,carol"),
        ("LIB_REPOS", "ui-kit,shared-models"),
        ("AUTO_PR_USERNAME", "release-bot"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Configuration built from [`test_vars`]
pub fn test_config(mode: Mode) -> Config {
    Config::from_vars(&test_vars(), mode).expect("test config")
}

/// Repository list from string slices
pub fn repos(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Open pull request fixture
pub fn make_pr(id: u64, source: &str, destination: &str, author: &str) -> PullRequest {
    PullRequest {
        id,
        version: 100 + i64::try_from(id).expect("small id"),
        title: format!("PR {id}"),
        source_branch: source.to_string(),
        destination_branch: destination.to_string(),
        author: Some(author.to_string()),
        url: Some(format!("https://bitbucket.example.com/pr/{id}")),
    }
}

/// Progress sink that records every event
#[derive(Default)]
pub struct RecordingProgress {
    pub events: std::sync::Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait::async_trait]
impl pr_batch::progress::ProgressCallback for RecordingProgress {
    async fn on_repo_start(&self, repo: &str) {
        self.push(format!("start {repo}"));
    }

    async fn on_message(&self, message: &str) {
        self.push(format!("message {message}"));
    }

    async fn on_success(&self, message: &str) {
        self.push(format!("success {message}"));
    }

    async fn on_error(&self, repo: &str, error: &pr_batch::error::Error) {
        self.push(format!("error {repo}: {error}"));
    }
}
