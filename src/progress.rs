//! Progress reporting for batch operations
//!
//! Batch workflows never print. They report through [`ProgressCallback`] and
//! the caller decides how to render.

use crate::error::Error;
use async_trait::async_trait;

/// Receiver of per-repository progress events
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A repository is about to be processed
    async fn on_repo_start(&self, repo: &str);

    /// Informational message
    async fn on_message(&self, message: &str);

    /// A step completed successfully
    async fn on_success(&self, message: &str);

    /// A step failed; the batch continues
    async fn on_error(&self, repo: &str, error: &Error);
}

/// Progress sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_repo_start(&self, _repo: &str) {}
    async fn on_message(&self, _message: &str) {}
    async fn on_success(&self, _message: &str) {}
    async fn on_error(&self, _repo: &str, _error: &Error) {}
}
