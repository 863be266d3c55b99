//! Create command - open a pull request in every target repository

use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize};
use crate::cli::{CliProgress, print_failures};
use anstream::println;
use pr_batch::config::{EnvSource, Mode};
use pr_batch::error::Result;
use pr_batch::reviewers::{parse_reviewers, pick_random_reviewers};
use pr_batch::submit::{CreateOptions, CreateRequest, create_pull_requests};
use pr_batch::targets::RepoSelector;

/// Options for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Source branch
    pub branch: String,
    /// Explicit title
    pub title: Option<String>,
    /// Explicit comma-separated reviewers
    pub reviewers: Option<String>,
    /// Repository selection
    pub selector: RepoSelector,
    /// Build drafts only
    pub dry_run: bool,
}

/// Run the create command
///
/// Returns `Ok(false)` when at least one repository failed.
pub async fn run_create(env: &EnvSource, args: CreateArgs) -> Result<bool> {
    let mode = Mode::Create {
        random_reviewers: args.reviewers.is_none(),
    };
    let ctx = CommandContext::new(env, mode, &args.selector)?;

    let reviewers = match args.reviewers.as_deref() {
        Some(raw) => parse_reviewers(raw),
        None => pick_random_reviewers(
            &ctx.config.reviewer_pool,
            ctx.config.min_reviewers,
            &mut rand::thread_rng(),
        )?,
    };

    if ctx.repos.is_empty() {
        println!("{}", "No repositories selected, nothing to do".muted());
        return Ok(true);
    }

    println!(
        "{} {} {} {} {}",
        "Creating PRs".emphasis(),
        args.branch.accent(),
        "→".muted(),
        ctx.config.destination_branch.accent(),
        format!("(reviewers: {})", reviewers.join(", ")).muted()
    );

    let request = CreateRequest {
        source_branch: args.branch,
        title: args.title,
        reviewers,
    };
    let options = CreateOptions {
        dry_run: args.dry_run,
    };

    let report = create_pull_requests(
        ctx.service.as_ref(),
        &ctx.config,
        &ctx.repos,
        &request,
        options,
        &CliProgress,
    )
    .await;

    println!();
    if args.dry_run {
        println!(
            "{}",
            format!("Dry run complete: {} PR(s) planned", report.planned.len()).muted()
        );
        return Ok(true);
    }

    println!(
        "{} {} created",
        format!("{CHECK} Done:").success(),
        report.created.len().accent()
    );
    print_failures("Failed:", &report.failures);

    Ok(report.is_success())
}
