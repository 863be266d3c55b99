//! Mock pull request service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_batch::error::{Error, Result};
use pr_batch::platform::PullRequestService;
use pr_batch::types::{CreatedPullRequest, PullRequest, PullRequestDraft};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub repo: String,
    pub pr_id: u64,
    pub version: i64,
}

/// Call record for `delete_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBranchCall {
    pub repo: String,
    pub branch: String,
}

/// Kind of failure to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Server answers with this status
    Rejected(u16),
    /// No response at all
    Transport,
}

impl Failure {
    fn to_error(self) -> Error {
        match self {
            Self::Rejected(status) => Error::Rejected {
                status,
                reason: "Injected".to_string(),
                body: format!("{{\"errors\": [{{\"message\": \"injected {status}\"}}]}}"),
            },
            Self::Transport => Error::Transport("connection refused".to_string()),
        }
    }
}

/// Simple mock pull request service for testing
///
/// Features:
/// - Auto-incrementing PR ids
/// - Call tracking for verification
/// - Configurable open PR listings per repository
/// - Error injection per repository or PR
pub struct MockPullRequestService {
    next_pr_id: AtomicU64,
    open_prs: Mutex<HashMap<String, Vec<PullRequest>>>,
    // Call tracking
    create_calls: Mutex<Vec<PullRequestDraft>>,
    list_calls: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    delete_calls: Mutex<Vec<DeleteBranchCall>>,
    // Error injection
    create_failures: Mutex<HashMap<String, Failure>>,
    list_failures: Mutex<HashMap<String, Failure>>,
    merge_failures: Mutex<HashMap<u64, Failure>>,
    delete_failures: Mutex<HashMap<String, Failure>>,
}

impl Default for MockPullRequestService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPullRequestService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            next_pr_id: AtomicU64::new(1),
            open_prs: Mutex::new(HashMap::new()),
            create_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            create_failures: Mutex::new(HashMap::new()),
            list_failures: Mutex::new(HashMap::new()),
            merge_failures: Mutex::new(HashMap::new()),
            delete_failures: Mutex::new(HashMap::new()),
        }
    }

    // === Response setup ===

    /// Set the open PRs listed for a repository
    pub fn set_open_prs(&self, repo: &str, prs: Vec<PullRequest>) {
        self.open_prs.lock().unwrap().insert(repo.to_string(), prs);
    }

    // === Error injection methods ===

    /// Make `create_pr` fail for a repository
    pub fn fail_create(&self, repo: &str, failure: Failure) {
        self.create_failures
            .lock()
            .unwrap()
            .insert(repo.to_string(), failure);
    }

    /// Make `list_open_prs` fail for a repository
    pub fn fail_list(&self, repo: &str, failure: Failure) {
        self.list_failures
            .lock()
            .unwrap()
            .insert(repo.to_string(), failure);
    }

    /// Make `merge_pr` fail for a PR id
    pub fn fail_merge(&self, pr_id: u64, failure: Failure) {
        self.merge_failures.lock().unwrap().insert(pr_id, failure);
    }

    /// Make `delete_branch` fail for a repository
    pub fn fail_delete(&self, repo: &str, failure: Failure) {
        self.delete_failures
            .lock()
            .unwrap()
            .insert(repo.to_string(), failure);
    }

    // === Call inspection ===

    pub fn create_calls(&self) -> Vec<PullRequestDraft> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<DeleteBranchCall> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestService for MockPullRequestService {
    async fn create_pr(&self, draft: &PullRequestDraft) -> Result<CreatedPullRequest> {
        self.create_calls.lock().unwrap().push(draft.clone());

        if let Some(failure) = self.create_failures.lock().unwrap().get(&draft.source.repo) {
            return Err(failure.to_error());
        }

        let id = self.next_pr_id.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedPullRequest {
            id,
            version: 0,
            url: Some(format!(
                "https://bitbucket.example.com/projects/SHOP/repos/{}/pull-requests/{id}",
                draft.source.repo
            )),
        })
    }

    async fn list_open_prs(&self, repo: &str) -> Result<Vec<PullRequest>> {
        self.list_calls.lock().unwrap().push(repo.to_string());

        if let Some(failure) = self.list_failures.lock().unwrap().get(repo) {
            return Err(failure.to_error());
        }

        Ok(self
            .open_prs
            .lock()
            .unwrap()
            .get(repo)
            .cloned()
            .unwrap_or_default())
    }

    async fn merge_pr(&self, repo: &str, pr_id: u64, version: i64) -> Result<()> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            repo: repo.to_string(),
            pr_id,
            version,
        });

        if let Some(failure) = self.merge_failures.lock().unwrap().get(&pr_id) {
            return Err(failure.to_error());
        }
        Ok(())
    }

    async fn delete_branch(&self, repo: &str, branch: &str) -> Result<()> {
        self.delete_calls.lock().unwrap().push(DeleteBranchCall {
            repo: repo.to_string(),
            branch: branch.to_string(),
        });

        if let Some(failure) = self.delete_failures.lock().unwrap().get(repo) {
            return Err(failure.to_error());
        }
        Ok(())
    }
}
