// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metric selection for a single invocation.
//!
//! A [`Mode`] is chosen once per run. It decides which fetchers the
//! per-repository worker executes and which field the ranker sorts by.

use std::fmt;

/// Statistics a single invocation can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum Metric
{
    /// Number of contributors, estimated from paginated listings.
    Contributors,
    /// Number of issues in any state, estimated from paginated listings.
    Issues,
    /// Repository metadata; only the star count is consumed.
    Info,
    /// Stars over time. Not collected yet.
    History,
}

impl Metric
{
    /// Lowercase name used in logs and error messages.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::Contributors => "contributors",
            Self::Issues => "issues",
            Self::Info => "repository info",
            Self::History => "star history",
        }
    }
}

impl fmt::Display for Metric
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

/// Field the collected results are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum SortKey
{
    /// Estimated contributor count.
    Contributors,
    /// Estimated issue count.
    Issues,
    /// Stargazer count.
    Stars,
}

impl SortKey
{
    /// Name of the key as shown in the report footer.
    pub fn label(self,) -> &'static str
    {
        match self {
            Self::Contributors => "contributors",
            Self::Issues => "issues",
            Self::Stars => "stars",
        }
    }
}

/// Collection mode of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Mode
{
    /// Repository info, contributors and issues, ranked by stars.
    All,
    /// A single metric, ranked by that metric when it has a numeric field.
    Single(Metric,),
}

impl Mode
{
    /// Returns `true` when the worker must run the fetcher for `metric`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_evaluator::{Metric, Mode};
    ///
    /// assert!(Mode::All.runs(Metric::Issues));
    /// assert!(!Mode::All.runs(Metric::History));
    /// assert!(!Mode::Single(Metric::Info).runs(Metric::Contributors));
    /// ```
    pub fn runs(self, metric: Metric,) -> bool
    {
        match self {
            Self::All => !matches!(metric, Metric::History),
            Self::Single(selected,) => selected == metric,
        }
    }

    /// Field used to rank the results of this mode.
    pub fn sort_key(self,) -> SortKey
    {
        match self {
            Self::Single(Metric::Contributors,) => SortKey::Contributors,
            Self::Single(Metric::Issues,) => SortKey::Issues,
            Self::All | Self::Single(Metric::Info | Metric::History,) => SortKey::Stars,
        }
    }
}
