// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Parsing of `owner/project` repository locations.

use std::fmt;

use crate::error::Error;

/// Repository coordinates derived from a configured location.
#[derive(Debug, Clone, PartialEq, Eq, Hash,)]
pub struct OwnerProject
{
    /// Account or organization owning the repository.
    pub owner:   String,
    /// Repository name.
    pub project: String,
}

impl OwnerProject
{
    /// Splits `location` on `/` into owner and project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLocation`] unless the split yields exactly two
    /// non-empty segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_evaluator::OwnerProject;
    ///
    /// let parsed = OwnerProject::parse("rust-lang/rust",).expect("valid location",);
    /// assert_eq!(parsed.owner, "rust-lang");
    /// assert_eq!(parsed.project, "rust");
    /// assert!(OwnerProject::parse("rust-lang/rust/issues",).is_err());
    /// ```
    pub fn parse(location: &str,) -> Result<Self, Error,>
    {
        let mut segments = location.split('/',);
        match (segments.next(), segments.next(), segments.next(),) {
            (Some(owner,), Some(project,), None,) if !owner.is_empty() && !project.is_empty() => {
                Ok(Self {
                    owner:   owner.to_owned(),
                    project: project.to_owned(),
                },)
            }
            _ => Err(Error::MalformedLocation {
                location: location.to_owned(),
            },),
        }
    }
}

impl fmt::Display for OwnerProject
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}/{}", self.owner, self.project)
    }
}
