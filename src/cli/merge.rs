//! Merge commands - merge branch PRs or automation PRs across repositories

use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize};
use crate::cli::{CliProgress, print_failures};
use anstream::println;
use pr_batch::config::{EnvSource, Mode};
use pr_batch::error::Result;
use pr_batch::merge::{
    AutomationCriteria, MergeOptions, MergeReport, merge_automatic_pull_requests,
    merge_matching_pull_requests,
};
use pr_batch::targets::RepoSelector;

/// Options for the merge command
#[derive(Debug, Clone)]
pub struct MergeArgs {
    /// Source branch whose PR is merged
    pub branch: String,
    /// Repository selection
    pub selector: RepoSelector,
    /// Dry run - show what would be merged without making changes
    pub dry_run: bool,
}

/// Options for the merge-auto command
#[derive(Debug, Clone)]
pub struct MergeAutoArgs {
    /// Repository selection
    pub selector: RepoSelector,
    /// Dry run - show what would be merged without making changes
    pub dry_run: bool,
}

/// Run the merge command
pub async fn run_merge(env: &EnvSource, args: MergeArgs) -> Result<bool> {
    let ctx = CommandContext::new(env, Mode::Merge, &args.selector)?;

    if ctx.repos.is_empty() {
        println!("{}", "No repositories selected, nothing to do".muted());
        return Ok(true);
    }

    println!(
        "{} {} {} {}",
        "Merging".emphasis(),
        args.branch.accent(),
        "→".muted(),
        ctx.config.destination_branch.accent()
    );

    let report = merge_matching_pull_requests(
        ctx.service.as_ref(),
        &ctx.repos,
        &args.branch,
        &ctx.config.destination_branch,
        MergeOptions {
            dry_run: args.dry_run,
        },
        &CliProgress,
    )
    .await;

    Ok(print_merge_summary(&report, args.dry_run))
}

/// Run the merge-auto command
pub async fn run_merge_auto(env: &EnvSource, args: MergeAutoArgs) -> Result<bool> {
    let mode = Mode::MergeAutomatic {
        default_targets: args.selector == RepoSelector::Default,
    };
    let ctx = CommandContext::new(env, mode, &args.selector)?;
    let criteria = AutomationCriteria::from_config(&ctx.config)?;

    if ctx.repos.is_empty() {
        println!("{}", "No repositories selected, nothing to do".muted());
        return Ok(true);
    }

    println!(
        "{} {} {} {} {}",
        "Merging automatic PRs".emphasis(),
        criteria.source_branch.accent(),
        "→".muted(),
        criteria.destination_branch.accent(),
        format!("(author: {})", criteria.author).muted()
    );

    let report = merge_automatic_pull_requests(
        ctx.service.as_ref(),
        &ctx.repos,
        &criteria,
        MergeOptions {
            dry_run: args.dry_run,
        },
        &CliProgress,
    )
    .await;

    Ok(print_merge_summary(&report, args.dry_run))
}

/// Print merge summary; returns whether the batch fully succeeded
fn print_merge_summary(report: &MergeReport, dry_run: bool) -> bool {
    println!();
    if dry_run {
        println!(
            "{}",
            format!("Dry run complete: {} merge(s) planned", report.planned.len()).muted()
        );
        print_failures("Skipped:", &report.failures);
        return report.failures.is_empty();
    }

    println!(
        "{} {} merged",
        format!("{CHECK} Done:").success(),
        report.merged.len().accent()
    );
    print_failures("Failed:", &report.failures);
    print_failures("Branch not deleted:", &report.branch_failures);

    report.is_success()
}
