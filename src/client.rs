// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Access to the repository hosting API.
//!
//! [`HostingApi`] is the seam between the metric fetchers and the network.
//! [`GitHubClient`] implements it on top of a single authenticated
//! [`Octocrab`] instance that is shared read-only by every worker. Each call
//! is a single attempt; failures are reported as [`AppError::service`].

use std::{future::Future, sync::LazyLock};

use masterror::AppError;
use octocrab::{Octocrab, Page, params};
use regex::Regex;
use tracing::debug;

use crate::{error::Error, location::OwnerProject};

/// Extracts the `page` query parameter from a pagination link.
static PAGE_PARAM: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"[?&]page=(\d+)",).expect("valid page regex",),);

/// Paginated listings the fetchers walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum Listing
{
    /// `GET /repos/{owner}/{repo}/contributors`
    Contributors,
    /// `GET /repos/{owner}/{repo}/issues?state=all`
    Issues,
}

impl Listing
{
    /// Number of items requested per page.
    pub fn page_size(self,) -> u8
    {
        match self {
            Self::Contributors => 100,
            Self::Issues => 30,
        }
    }
}

/// Pagination facts reported by a single page response.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct PageSlice
{
    /// First page number advertised by the response.
    pub first: u32,
    /// Last page number advertised by the response.
    pub last:  u32,
    /// Number of items on the returned page.
    pub len:   usize,
}

impl PageSlice
{
    /// Reads the page span from an octocrab response.
    ///
    /// GitHub omits `rel="first"` on the first page and `rel="last"` on the
    /// last one, so a missing `first` falls back to the requested page and a
    /// missing `last` falls back to `first`.
    pub fn from_page<T,>(response: &Page<T,>, requested: u32,) -> Self
    {
        let (first, last,) = page_span(
            response.first.as_ref().and_then(|uri| page_number(&uri.to_string(),),),
            response.last.as_ref().and_then(|uri| page_number(&uri.to_string(),),),
            requested,
        );

        Self {
            first,
            last,
            len: response.items.len(),
        }
    }
}

/// Resolves the advertised page span, filling in links the API left out.
fn page_span(first: Option<u32,>, last: Option<u32,>, requested: u32,) -> (u32, u32,)
{
    let first = first.unwrap_or(requested,);
    (first, last.unwrap_or(first,),)
}

/// Repository metadata consumed by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct RepositoryInfo
{
    /// Stargazer count.
    pub stars: u64,
}

/// Operations the fetchers need from the hosting service.
///
/// Implementations must be safe to share across concurrently running
/// workers.
pub trait HostingApi: Send + Sync + 'static
{
    /// Requests one page of `listing` for `target` using the listing's page
    /// size.
    fn list_page(
        &self,
        listing: Listing,
        target: &OwnerProject,
        page: u32,
    ) -> impl Future<Output = Result<PageSlice, AppError,>,> + Send;

    /// Requests repository metadata for `target`.
    fn repository(
        &self,
        target: &OwnerProject,
    ) -> impl Future<Output = Result<RepositoryInfo, AppError,>,> + Send;
}

/// [`HostingApi`] backed by the GitHub REST API.
#[derive(Debug, Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
}

impl GitHubClient
{
    /// Builds a client authenticating every request with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(token: &str,) -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_owned(),)
            .build()
            .map_err(|e| Error::client(e.to_string(),),)?;

        Ok(Self {
            octocrab,
        },)
    }
}

impl HostingApi for GitHubClient
{
    async fn list_page(
        &self,
        listing: Listing,
        target: &OwnerProject,
        page: u32,
    ) -> Result<PageSlice, AppError,>
    {
        debug!("Requesting {:?} page {} for {}", listing, page, target);
        let per_page = listing.page_size();

        let slice = match listing {
            Listing::Contributors => {
                let response = self
                    .octocrab
                    .repos(&target.owner, &target.project,)
                    .list_contributors()
                    .per_page(per_page,)
                    .page(page,)
                    .send()
                    .await
                    .map_err(|e| AppError::service(format!("failed to list contributors: {e}"),),)?;
                PageSlice::from_page(&response, page,)
            }
            Listing::Issues => {
                let response = self
                    .octocrab
                    .issues(&target.owner, &target.project,)
                    .list()
                    .state(params::State::All,)
                    .per_page(per_page,)
                    .page(page,)
                    .send()
                    .await
                    .map_err(|e| AppError::service(format!("failed to list issues: {e}"),),)?;
                PageSlice::from_page(&response, page,)
            }
        };

        debug!(
            "{:?} page {} for {} returned {} items (pages {}..={})",
            listing, page, target, slice.len, slice.first, slice.last
        );
        Ok(slice,)
    }

    async fn repository(&self, target: &OwnerProject,) -> Result<RepositoryInfo, AppError,>
    {
        debug!("Requesting repository info for {}", target);
        let repository = self
            .octocrab
            .repos(&target.owner, &target.project,)
            .get()
            .await
            .map_err(|e| AppError::service(format!("failed to fetch repository: {e}"),),)?;

        Ok(RepositoryInfo {
            stars: u64::from(repository.stargazers_count.unwrap_or(0,),),
        },)
    }
}

/// Returns the `page` query parameter of a pagination link, if any.
///
/// # Examples
///
/// ```
/// use repo_evaluator::page_number;
///
/// let link = "https://api.github.com/repositories/1/contributors?per_page=100&page=7";
/// assert_eq!(page_number(link,), Some(7));
/// assert_eq!(page_number("https://api.github.com/repos/a/b/issues?per_page=30",), None);
/// ```
pub fn page_number(link: &str,) -> Option<u32,>
{
    PAGE_PARAM.captures(link,).and_then(|captures| captures[1].parse().ok(),)
}

/// In-memory [`HostingApi`] used by unit tests.
#[cfg(test)]
pub(crate) mod fake
{
    use std::{
        collections::{HashMap, HashSet},
        sync::Mutex,
    };

    use masterror::AppError;

    use super::{HostingApi, Listing, PageSlice, RepositoryInfo};
    use crate::location::OwnerProject;

    /// Canned data for one repository. `None` makes the matching call fail.
    #[derive(Debug, Clone, Default,)]
    pub(crate) struct FakeRepository
    {
        pub stars:        Option<u64,>,
        pub contributors: Option<u64,>,
        pub issues:       Option<u64,>,
    }

    /// A request observed by the fake.
    #[derive(Debug, Clone, PartialEq, Eq,)]
    pub(crate) enum Request
    {
        Page(String, Listing, u32,),
        Repository(String,),
    }

    #[derive(Debug, Default,)]
    pub(crate) struct FakeApi
    {
        repositories: HashMap<String, FakeRepository,>,
        panicking:    HashSet<String,>,
        requests:     Mutex<Vec<Request,>,>,
    }

    impl FakeApi
    {
        pub(crate) fn with(mut self, location: &str, repository: FakeRepository,) -> Self
        {
            self.repositories.insert(location.to_owned(), repository,);
            self
        }

        /// Makes every request for `location` panic.
        pub(crate) fn panicking(mut self, location: &str,) -> Self
        {
            self.panicking.insert(location.to_owned(),);
            self
        }

        pub(crate) fn requests(&self,) -> Vec<Request,>
        {
            self.requests.lock().expect("requests lock",).clone()
        }

        fn record(&self, request: Request,)
        {
            self.requests.lock().expect("requests lock",).push(request,);
        }

        fn lookup(&self, target: &OwnerProject,) -> Result<&FakeRepository, AppError,>
        {
            let location = target.to_string();
            if self.panicking.contains(&location,) {
                panic!("simulated crash for {location}");
            }
            self.repositories
                .get(&location,)
                .ok_or_else(|| AppError::service(format!("{target} does not exist"),),)
        }
    }

    impl HostingApi for FakeApi
    {
        async fn list_page(
            &self,
            listing: Listing,
            target: &OwnerProject,
            page: u32,
        ) -> Result<PageSlice, AppError,>
        {
            self.record(Request::Page(target.to_string(), listing, page,),);
            let repository = self.lookup(target,)?;
            let total = match listing {
                Listing::Contributors => repository.contributors,
                Listing::Issues => repository.issues,
            }
            .ok_or_else(|| AppError::service("listing unavailable",),)?;

            let per_page = u64::from(listing.page_size(),);
            let last = total.div_ceil(per_page,).max(1,) as u32;
            let already_listed = u64::from(page - 1,) * per_page;
            let len = total.saturating_sub(already_listed,).min(per_page,) as usize;

            Ok(PageSlice {
                first: 1,
                last,
                len,
            },)
        }

        async fn repository(&self, target: &OwnerProject,) -> Result<RepositoryInfo, AppError,>
        {
            self.record(Request::Repository(target.to_string(),),);
            let repository = self.lookup(target,)?;
            let stars = repository.stars.ok_or_else(|| AppError::service("metadata unavailable",),)?;
            Ok(RepositoryInfo {
                stars,
            },)
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::{Listing, page_number, page_span};

    #[test]
    fn page_number_ignores_per_page_parameter()
    {
        assert_eq!(page_number("https://api.github.com/x?per_page=100"), None);
        assert_eq!(page_number("https://api.github.com/x?page=3&per_page=100"), Some(3));
        assert_eq!(page_number("https://api.github.com/x?per_page=100&page=12"), Some(12));
    }

    #[test]
    fn page_number_rejects_non_numeric_values()
    {
        assert_eq!(page_number("https://api.github.com/x?page=last"), None);
    }

    #[test]
    fn single_page_response_spans_the_requested_page()
    {
        assert_eq!(page_span(None, None, 1), (1, 1));
    }

    #[test]
    fn first_page_of_many_starts_at_the_requested_page()
    {
        let last = page_number("https://api.github.com/repositories/1/contributors?per_page=100&page=3",);
        assert_eq!(page_span(None, last, 1), (1, 3));
    }

    #[test]
    fn last_page_response_keeps_advertised_first_page()
    {
        let first = page_number("https://api.github.com/repositories/1/issues?state=all&per_page=30&page=1",);
        assert_eq!(page_span(first, None, 4), (1, 1));
        assert_eq!(page_span(first, Some(4,), 2), (1, 4));
    }

    #[test]
    fn unparsable_links_fall_back_to_the_requested_page()
    {
        let first = page_number("https://api.github.com/repositories/1/contributors?per_page=100",);
        let last = page_number("https://api.github.com/repositories/1/contributors?page=last",);
        assert_eq!(page_span(first, last, 2), (2, 2));
    }

    #[test]
    fn listing_page_sizes()
    {
        assert_eq!(Listing::Contributors.page_size(), 100);
        assert_eq!(Listing::Issues.page_size(), 30);
    }
}
