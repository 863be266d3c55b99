//! Merge engine
//!
//! Two-phase pattern matching submit/:
//! 1. Plan - pick the PRs to merge from a listing (pure, testable)
//! 2. Execute - list, merge, delete branches (effectful)

mod execute;
mod plan;

pub use execute::{
    MergeOptions, MergeReport, MergedEntry, merge_automatic_pull_requests,
    merge_matching_pull_requests,
};
pub use plan::{AutomationCriteria, MergeTarget, plan_automatic_merges, plan_branch_merge};
