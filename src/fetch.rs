// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metric fetchers.
//!
//! Contributor and issue totals are estimated from at most two page
//! requests: the first page, and the last page when more than one exists.
//! Intermediate pages are assumed to be full. The estimate is kept as is so
//! reported numbers stay comparable across runs.

use masterror::AppError;
use tracing::debug;

use crate::{
    client::{HostingApi, Listing, RepositoryInfo},
    error::Error,
    location::OwnerProject,
    metric::Metric,
    worker::RepoResult,
};

/// Estimates a paginated total from the last page.
///
/// Every page before `last` is counted as holding `per_page` items.
///
/// # Examples
///
/// ```
/// use repo_evaluator::extrapolate_total;
///
/// assert_eq!(extrapolate_total(100, 1, 3, 47,), 247);
/// assert_eq!(extrapolate_total(30, 1, 1, 12,), 12);
/// ```
pub fn extrapolate_total(per_page: u8, first: u32, last: u32, len_of_last: usize,) -> u64
{
    u64::from(per_page,) * u64::from(last.saturating_sub(first,),) + len_of_last as u64
}

/// Estimates the number of contributors of `target`.
///
/// # Errors
///
/// Returns [`Error::FetchFailed`] when either page request fails.
pub async fn fetch_contributors<A: HostingApi,>(
    api: &A,
    target: &OwnerProject,
) -> Result<u64, Error,>
{
    count_listing(api, target, Listing::Contributors, Metric::Contributors,).await
}

/// Estimates the number of open and closed issues of `target`.
///
/// # Errors
///
/// Returns [`Error::FetchFailed`] when either page request fails.
pub async fn fetch_issues<A: HostingApi,>(api: &A, target: &OwnerProject,) -> Result<u64, Error,>
{
    count_listing(api, target, Listing::Issues, Metric::Issues,).await
}

/// Fetches repository metadata for `target`.
///
/// # Errors
///
/// Returns [`Error::FetchFailed`] when the request fails.
pub async fn fetch_info<A: HostingApi,>(
    api: &A,
    target: &OwnerProject,
) -> Result<RepositoryInfo, Error,>
{
    let info =
        api.repository(target,).await.map_err(|source| fetch_failed(Metric::Info, target, source,),)?;
    debug!("{} has {} stars", target, info.stars);
    Ok(info,)
}

/// Placeholder for stars-over-time collection.
///
/// Issues no request and leaves `result` untouched.
///
/// # Errors
///
/// Never fails; the signature matches the other fetchers.
pub async fn fetch_history<A: HostingApi,>(
    _api: &A,
    target: &OwnerProject,
    _result: &mut RepoResult,
) -> Result<(), Error,>
{
    debug!("Star history is not collected for {}", target);
    Ok((),)
}

async fn count_listing<A: HostingApi,>(
    api: &A,
    target: &OwnerProject,
    listing: Listing,
    metric: Metric,
) -> Result<u64, Error,>
{
    let head = api
        .list_page(listing, target, 1,)
        .await
        .map_err(|source| fetch_failed(metric, target, source,),)?;

    if head.first == head.last {
        debug!("{} for {} fit on one page: {}", metric, target, head.len);
        return Ok(head.len as u64,);
    }

    let tail = api
        .list_page(listing, target, head.last,)
        .await
        .map_err(|source| fetch_failed(metric, target, source,),)?;
    let total = extrapolate_total(listing.page_size(), head.first, head.last, tail.len,);
    debug!(
        "{} for {} span pages {}..={}, estimated total {}",
        metric, target, head.first, head.last, total
    );
    Ok(total,)
}

fn fetch_failed(metric: Metric, target: &OwnerProject, source: AppError,) -> Error
{
    Error::FetchFailed {
        metric,
        location: target.to_string(),
        source,
    }
}
