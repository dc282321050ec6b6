// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-repository evaluation pipeline.
//!
//! A worker parses the configured location and then runs the fetchers the
//! active [`Mode`] requires, strictly one after another: repository info,
//! contributors, issues, star history. The first failure stops the pipeline.
//! Values fetched before the failure stay on the result next to the error.

use tracing::{debug, error, warn};

use crate::{
    client::HostingApi,
    config::RepoSpec,
    error::Error,
    fetch,
    location::OwnerProject,
    metric::{Metric, Mode},
};

/// Metrics collected for one configured repository.
///
/// `None` marks a value that is unknown, either because the mode did not
/// request it or because fetching it failed.
#[derive(Debug,)]
pub struct RepoResult
{
    /// Configured repository the values belong to.
    pub spec:         RepoSpec,
    /// Estimated contributor count.
    pub contributors: Option<u64,>,
    /// Estimated issue count, open and closed.
    pub issues:       Option<u64,>,
    /// Stargazer count.
    pub stars:        Option<u64,>,
    /// Failure that stopped the pipeline, if any.
    pub error:        Option<Error,>,
}

impl RepoResult
{
    /// Creates an empty result for `spec`.
    pub fn new(spec: RepoSpec,) -> Self
    {
        Self {
            spec,
            contributors: None,
            issues: None,
            stars: None,
            error: None,
        }
    }
}

/// Evaluates one repository and returns its result.
///
/// Always returns exactly one [`RepoResult`]; failures are attached to it
/// instead of being propagated.
pub async fn evaluate_repository<A: HostingApi,>(api: &A, spec: RepoSpec, mode: Mode,) -> RepoResult
{
    let mut result = RepoResult::new(spec,);
    if let Err(error,) = run_pipeline(api, mode, &mut result,).await {
        if error.is_repository_local() {
            warn!("{} ({}): {}", result.spec.name, result.spec.location, error);
        } else {
            error!("{} ({}) hit a fatal error: {}", result.spec.name, result.spec.location, error);
        }
        result.error = Some(error,);
    } else {
        debug!("{} ({}) evaluated", result.spec.name, result.spec.location);
    }
    result
}

async fn run_pipeline<A: HostingApi,>(
    api: &A,
    mode: Mode,
    result: &mut RepoResult,
) -> Result<(), Error,>
{
    let target = OwnerProject::parse(&result.spec.location,)?;

    if mode.runs(Metric::Info,) {
        result.stars = Some(fetch::fetch_info(api, &target,).await?.stars,);
    }
    if mode.runs(Metric::Contributors,) {
        result.contributors = Some(fetch::fetch_contributors(api, &target,).await?,);
    }
    if mode.runs(Metric::Issues,) {
        result.issues = Some(fetch::fetch_issues(api, &target,).await?,);
    }
    if mode.runs(Metric::History,) {
        fetch::fetch_history(api, &target, result,).await?;
    }

    Ok((),)
}
