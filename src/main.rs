//! prb - batch pull request operations for Bitbucket Server

mod cli;

use clap::{Args, Parser, Subcommand};
use cli::create::{CreateArgs, run_create};
use cli::merge::{MergeArgs, MergeAutoArgs, run_merge, run_merge_auto};
use cli::{print_config_error, print_error_detail};
use pr_batch::config::{EnvSource, split_list};
use pr_batch::targets::RepoSelector;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "prb",
    version,
    about = "Batch pull request creation and merging for Bitbucket Server"
)]
struct Cli {
    /// Load `.env.<PROJECT>` from the current directory
    #[arg(long, visible_alias = "prj", global = true, conflicts_with = "env_file")]
    project: Option<String>,

    /// Load variables from this dotenv file
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Repository selection; at most one selector may be given
#[derive(Args, Debug, Clone)]
struct RepoArgs {
    /// Comma-separated list of repository slugs
    #[arg(long, visible_alias = "rs", conflicts_with_all = ["group", "lib"])]
    repos: Option<String>,

    /// Repository group defined by a `<GROUP>_REPOS` variable
    #[arg(long, conflicts_with = "lib")]
    group: Option<String>,

    /// Operate on the library repositories (`LIB_REPOS`)
    #[arg(long)]
    lib: bool,
}

impl RepoArgs {
    fn selector(&self) -> RepoSelector {
        RepoSelector::from_options(
            self.repos.as_deref().map(split_list),
            self.group.clone(),
            self.lib,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a pull request in every target repository
    Create {
        /// Source branch name
        #[arg(short, long)]
        branch: String,

        /// PR title (defaults to the branch name without its type prefix)
        #[arg(short, long)]
        title: Option<String>,

        /// Comma-separated list of reviewers (defaults to a random pick)
        #[arg(long, visible_alias = "rvw")]
        reviewers: Option<String>,

        #[command(flatten)]
        repos: RepoArgs,

        /// Show the pull requests that would be created
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge the open pull request of a branch and delete the branch
    Merge {
        /// Source branch name
        #[arg(short, long)]
        branch: String,

        #[command(flatten)]
        repos: RepoArgs,

        /// Show what would be merged without merging
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge every pull request opened by the automation account
    MergeAuto {
        #[command(flatten)]
        repos: RepoArgs,

        /// Show what would be merged without merging
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "error,pr_batch=debug" } else { "error" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let env = match (cli.project, cli.env_file) {
        (Some(project), _) => EnvSource::Profile(project),
        (None, Some(path)) => EnvSource::File(path),
        (None, None) => EnvSource::Default,
    };

    let result = match cli.command {
        Commands::Create {
            branch,
            title,
            reviewers,
            repos,
            dry_run,
        } => {
            run_create(
                &env,
                CreateArgs {
                    branch,
                    title,
                    reviewers,
                    selector: repos.selector(),
                    dry_run,
                },
            )
            .await
        }
        Commands::Merge {
            branch,
            repos,
            dry_run,
        } => {
            run_merge(
                &env,
                MergeArgs {
                    branch,
                    selector: repos.selector(),
                    dry_run,
                },
            )
            .await
        }
        Commands::MergeAuto { repos, dry_run } => {
            run_merge_auto(
                &env,
                MergeAutoArgs {
                    selector: repos.selector(),
                    dry_run,
                },
            )
            .await
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) if e.is_config() => {
            print_config_error(&e);
            ExitCode::FAILURE
        }
        Err(e) => {
            print_error_detail(&e);
            ExitCode::FAILURE
        }
    }
}
