//! CLI commands and console rendering

pub mod context;
pub mod create;
pub mod merge;
pub mod style;

use anstream::{eprintln, println};
use async_trait::async_trait;
use pr_batch::error::Error;
use pr_batch::progress::ProgressCallback;
use pr_batch::report::RepoFailure;
use style::{Stylize, check, cross};

/// Console progress reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_repo_start(&self, repo: &str) {
        println!("{} {}", "→".muted(), repo.accent());
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }

    async fn on_success(&self, message: &str) {
        println!("  {} {message}", check());
    }

    async fn on_error(&self, _repo: &str, error: &Error) {
        print_error_detail(error);
    }
}

/// Print an error with the details an operator needs
///
/// Rejections include the status and the server payload; transport failures
/// point at the URL or network.
pub fn print_error_detail(error: &Error) {
    match error {
        Error::Rejected { status, reason, body } => {
            eprintln!("  {} {}", cross(), format!("Request rejected: {status} {reason}").error());
            if !body.is_empty() {
                for line in body.lines() {
                    eprintln!("    {}", line.muted());
                }
            }
        }
        Error::Transport(detail) => {
            eprintln!(
                "  {} {}",
                cross(),
                "No response from server. Check the base URL or network connection.".error()
            );
            eprintln!("    {}", detail.muted());
        }
        other => eprintln!("  {} {}", cross(), other.to_string().error()),
    }
}

/// Print a fatal configuration error
pub fn print_config_error(error: &Error) {
    match error {
        Error::MissingConfig(names) => {
            eprintln!("{}", "Missing required environment variables:".error());
            for name in names {
                eprintln!("   - {name}");
            }
            eprintln!(
                "{}",
                "Set these variables in your environment or env profile before running.".muted()
            );
        }
        other => eprintln!("{} {}", cross(), other.to_string().error()),
    }
}

/// Print the end-of-batch failure summary
pub fn print_failures(title: &str, failures: &[RepoFailure]) {
    if failures.is_empty() {
        return;
    }
    println!("   {} {}", title.warn(), failures.len().accent());
    for failure in failures {
        println!("     {} {}", failure.repo.warn(), failure.error.to_string().muted());
    }
}
