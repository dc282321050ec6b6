// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table rendering of ranked results.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

use crate::{metric::Mode, worker::RepoResult};

/// Cell text for values that are not known.
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Tabled,)]
struct ReportRow
{
    #[tabled(rename = "Name")]
    name:         String,
    #[tabled(rename = "Location")]
    location:     String,
    #[tabled(rename = "Contributors")]
    contributors: String,
    #[tabled(rename = "Issues")]
    issues:       String,
    #[tabled(rename = "Stars")]
    stars:        String,
    #[tabled(rename = "Etc")]
    etc:          String,
}

impl From<&RepoResult,> for ReportRow
{
    fn from(result: &RepoResult,) -> Self
    {
        Self {
            name:         result.spec.name.clone(),
            location:     result.spec.location.clone(),
            contributors: cell(result.contributors,),
            issues:       cell(result.issues,),
            stars:        cell(result.stars,),
            etc:          result.spec.etc.clone().unwrap_or_default(),
        }
    }
}

fn cell(value: Option<u64,>,) -> String
{
    value.map_or_else(|| UNKNOWN.to_owned(), |value| value.to_string(),)
}

/// Renders `results` in the given order as a table.
///
/// The footer records when the report was generated and which metric the
/// rows are sorted by.
pub fn render_report<Tz,>(results: &[RepoResult], mode: Mode, generated_at: &DateTime<Tz,>,) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows: Vec<ReportRow,> = results.iter().map(ReportRow::from,).collect();
    let footer = format!(
        "Generated at {}, sorted by {}",
        generated_at.format("%Y-%m-%d %H:%M:%S %:z",),
        mode.sort_key().label()
    );

    let mut table = Table::new(rows,);
    table.with(Style::modern(),).with(Panel::footer(footer,),);
    table.to_string()
}

#[cfg(test)]
mod tests
{
    use chrono::{FixedOffset, TimeZone};

    use super::render_report;
    use crate::{
        config::RepoSpec,
        error::Error,
        metric::{Metric, Mode},
        worker::RepoResult,
    };

    fn generated_at() -> chrono::DateTime<FixedOffset,>
    {
        FixedOffset::east_opt(0,)
            .expect("valid offset",)
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 0,)
            .single()
            .expect("valid timestamp",)
    }

    #[test]
    fn renders_headers_values_and_footer()
    {
        let mut result = RepoResult::new(RepoSpec {
            name:     "Hello".to_owned(),
            location: "octocat/hello".to_owned(),
            etc:      Some("demo".to_owned(),),
        },);
        result.contributors = Some(12,);
        result.issues = Some(34,);
        result.stars = Some(56,);

        let output = render_report(&[result], Mode::All, &generated_at(),);

        for header in ["Name", "Location", "Contributors", "Issues", "Stars", "Etc"] {
            assert!(output.contains(header), "missing header {header}");
        }
        for value in ["Hello", "octocat/hello", "12", "34", "56", "demo"] {
            assert!(output.contains(value), "missing value {value}");
        }
        assert!(output.contains("Generated at 2024-05-01 12:30:00 +00:00, sorted by stars"));
    }

    #[test]
    fn failed_repository_shows_unknown_cells()
    {
        let mut result = RepoResult::new(RepoSpec {
            name:     "Broken".to_owned(),
            location: "broken".to_owned(),
            etc:      None,
        },);
        result.error = Some(Error::MalformedLocation {
            location: "broken".to_owned(),
        },);

        let output =
            render_report(&[result], Mode::Single(Metric::Contributors,), &generated_at(),);

        assert_eq!(output.matches("unknown").count(), 3);
        assert!(output.contains("sorted by contributors"));
    }
}
