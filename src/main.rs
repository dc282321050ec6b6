//! Command-line interface for the repo-evaluator binary.
//!
//! Without a subcommand every metric is collected and the table is ranked by
//! stars. The `contributors`, `issues`, `info` and `history` subcommands
//! restrict collection to one metric.

use std::{path::PathBuf, process, sync::Arc};

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use repo_evaluator::{
    DEFAULT_TOKEN_FILE, Error, GitHubClient, Metric, Mode, evaluate_all, load_repositories,
    load_token, render_report,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for ranking GitHub repositories.
#[derive(Debug, Parser,)]
#[command(
    name = "repo-evaluator",
    version,
    about = "Rank GitHub repositories by contributors, issues and stars"
)]
struct Cli
{
    #[command(subcommand)]
    command: Option<Command,>,

    /// YAML file listing the repositories to evaluate.
    #[arg(value_name = "REPOSITORIES")]
    repositories: Option<PathBuf,>,

    /// File holding the GitHub API token.
    #[arg(
        long = "token",
        value_name = "PATH",
        env = "REPO_EVALUATOR_TOKEN_FILE",
        default_value = DEFAULT_TOKEN_FILE,
        global = true
    )]
    token: PathBuf,
}

#[derive(Debug, Subcommand,)]
/// Single-metric reports.
enum Command
{
    /// Rank repositories by contributor count.
    Contributors(MetricArgs,),
    /// Rank repositories by issue count.
    Issues(MetricArgs,),
    /// Rank repositories by star count.
    Info(MetricArgs,),
    /// Star history (not collected yet).
    History(MetricArgs,),
}

#[derive(Debug, Args,)]
struct MetricArgs
{
    /// YAML file listing the repositories to evaluate.
    #[arg(value_name = "REPOSITORIES")]
    repositories: PathBuf,
}

/// Fully resolved inputs of one invocation.
#[derive(Debug, PartialEq, Eq,)]
struct Invocation
{
    repositories: PathBuf,
    token:        PathBuf,
    mode:         Mode,
}

impl Cli
{
    fn into_invocation(self,) -> Result<Invocation, Error,>
    {
        let (repositories, mode,) = match self.command {
            Some(Command::Contributors(args,),) => {
                (args.repositories, Mode::Single(Metric::Contributors,),)
            }
            Some(Command::Issues(args,),) => (args.repositories, Mode::Single(Metric::Issues,),),
            Some(Command::Info(args,),) => (args.repositories, Mode::Single(Metric::Info,),),
            Some(Command::History(args,),) => (args.repositories, Mode::Single(Metric::History,),),
            None => {
                let repositories = self.repositories.ok_or_else(|| {
                    Error::usage("missing required <REPOSITORIES> argument",)
                },)?;
                (repositories, Mode::All,)
            }
        };

        Ok(Invocation {
            repositories,
            token: self.token,
            mode,
        },)
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(std::io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates startup failures: usage errors, unreadable token or repository
/// list, and client construction. Per-repository failures are rendered in
/// the report instead.
async fn run() -> Result<(), Error,>
{
    let invocation = Cli::parse().into_invocation()?;
    let report = run_invocation(&invocation,).await?;
    println!("{report}");
    Ok((),)
}

async fn run_invocation(invocation: &Invocation,) -> Result<String, Error,>
{
    let token = load_token(&invocation.token,)?;
    let specs = load_repositories(&invocation.repositories,)?;
    info!("Loaded {} repositories from {}", specs.len(), invocation.repositories.display());

    let client = Arc::new(GitHubClient::new(&token,)?,);
    let results = evaluate_all(client, specs, invocation.mode,).await;

    Ok(render_report(&results, invocation.mode, &Local::now(),),)
}
