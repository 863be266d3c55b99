//! pr-batch: batch pull request operations for Bitbucket Server
//!
//! Creates pull requests across a set of repositories, merges the matching
//! pull request of a branch (deleting the branch afterwards), and merges
//! pull requests opened by an automation account. Repositories are handled
//! one at a time and a failure in one repository never stops the batch.
//!
//! The binary (`prb`) wires these pieces to a clap CLI; everything here is
//! usable without touching the process environment.

pub mod auth;
pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod progress;
pub mod report;
pub mod reviewers;
pub mod submit;
pub mod targets;
pub mod types;
