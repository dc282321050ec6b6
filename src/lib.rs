//! Ranking of GitHub repositories by contributors, issues and stars.
//!
//! The library loads a YAML list of repositories, evaluates every entry
//! concurrently against the GitHub API and orders the results by the metric
//! selected for the invocation. Failures local to one repository are kept on
//! its [`RepoResult`] and never abort the batch; only startup failures
//! (repository list, token, client construction) are fatal.
//!
//! # Examples
//!
//! ```no_run
//! use std::{path::Path, sync::Arc};
//!
//! use repo_evaluator::{GitHubClient, Mode, evaluate_all, load_repositories, load_token};
//!
//! # async fn example() -> Result<(), repo_evaluator::Error> {
//! let token = load_token(Path::new("token",),)?;
//! let specs = load_repositories(Path::new("repos.yaml",),)?;
//! let client = Arc::new(GitHubClient::new(&token,)?,);
//! let results = evaluate_all(client, specs, Mode::All,).await;
//! println!("{} repositories evaluated", results.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod collector;
mod config;
mod error;
mod fetch;
mod location;
mod metric;
mod rank;
mod report;
mod worker;

use std::sync::Arc;

pub use client::{GitHubClient, HostingApi, Listing, PageSlice, RepositoryInfo, page_number};
pub use collector::collect;
pub use config::{DEFAULT_TOKEN_FILE, RepoSpec, load_repositories, load_token, parse_repositories};
pub use error::{Error, config_read_error, credential_read_error};
pub use fetch::{extrapolate_total, fetch_contributors, fetch_history, fetch_info, fetch_issues};
pub use location::OwnerProject;
pub use metric::{Metric, Mode, SortKey};
pub use rank::rank;
pub use report::{UNKNOWN, render_report};
pub use worker::{RepoResult, evaluate_repository};

/// Collects results for every repository in `specs` and ranks them for
/// `mode`.
pub async fn evaluate_all<A: HostingApi,>(
    api: Arc<A,>,
    specs: Vec<RepoSpec,>,
    mode: Mode,
) -> Vec<RepoResult,>
{
    let mut results = collect(api, specs, mode,).await;
    rank(&mut results, mode,);
    results
}
