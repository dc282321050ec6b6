// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Input documents consumed at startup.
//!
//! Two files are read before any network traffic happens: the YAML list of
//! repositories to evaluate and the API token. Failures in either are fatal
//! for the invocation.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Error};

/// Default name of the token file, resolved against the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "token";

/// One configured repository.
///
/// # Examples
///
/// ```
/// use repo_evaluator::RepoSpec;
///
/// let yaml = r#"
/// - name: Tokio
///   location: tokio-rs/tokio
///   etc: async runtime
/// "#;
/// let specs: Vec<RepoSpec,> = serde_yaml::from_str(yaml,).expect("valid repositories",);
/// assert_eq!(specs[0].location, "tokio-rs/tokio");
/// assert_eq!(specs[0].etc.as_deref(), Some("async runtime"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
pub struct RepoSpec
{
    /// Display name shown in the report.
    pub name:     String,
    /// Repository location in `owner/project` form.
    pub location: String,
    /// Free text echoed into the report's `Etc` column.
    #[serde(default)]
    pub etc:      Option<String,>,
}

/// Loads the repository list from the YAML file at `path`.
///
/// # Errors
///
/// Returns [`Error::ConfigRead`] when the file cannot be read and
/// [`Error::ConfigParse`] when it is not a YAML sequence of repositories.
pub fn load_repositories(path: &Path,) -> Result<Vec<RepoSpec,>, Error,>
{
    let contents =
        fs::read_to_string(path,).map_err(|source| error::config_read_error(path, source,),)?;
    let specs = parse_repositories(&contents,).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    },)?;
    debug!("Loaded {} repositories from {}", specs.len(), path.display());
    Ok(specs,)
}

/// Parses a repository list from the provided YAML document string.
///
/// # Errors
///
/// Propagates the decoding error when the document is not a sequence of
/// `{name, location, etc}` records.
pub fn parse_repositories(contents: &str,) -> Result<Vec<RepoSpec,>, serde_yaml::Error,>
{
    serde_yaml::from_str(contents,)
}

/// Reads the API token from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`Error::CredentialRead`] when the file cannot be read and
/// [`Error::CredentialEmpty`] when it holds nothing but whitespace.
pub fn load_token(path: &Path,) -> Result<String, Error,>
{
    let raw =
        fs::read_to_string(path,).map_err(|source| error::credential_read_error(path, source,),)?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(Error::CredentialEmpty {
            path: path.to_path_buf(),
        },);
    }
    Ok(token.to_owned(),)
}
