//! Pull request creation
//!
//! Two-phase pattern:
//! 1. Draft - build one `PullRequestDraft` per repository (pure, testable)
//! 2. Execute - submit the drafts sequentially (effectful)

mod draft;
mod execute;

pub use draft::{
    BRANCH_TYPE_PREFIXES, CreateRequest, build_draft, resolve_title, strip_branch_prefix,
};
pub use execute::{CreateOptions, CreateReport, CreatedEntry, create_pull_requests};
