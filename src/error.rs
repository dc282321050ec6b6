#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the evaluator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Errors fall into two classes. Repository-local failures
//! ([`Error::MalformedLocation`], [`Error::FetchFailed`] and
//! [`Error::WorkerFailed`]) are captured on
//! the affected [`RepoResult`](crate::RepoResult) and never abort the batch.
//! Every other variant is fatal and is reported by the binary before any
//! repository is polled.

use std::path::{Path, PathBuf};

use masterror::AppError;

use crate::metric::Metric;

/// Unified error type returned by the loaders, the fetchers and the CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Returned when a location is not of the form `owner/project`.
    #[error("malformed location '{location}': expected owner/project")]
    MalformedLocation {
        /// Offending location string exactly as configured.
        location: String
    },
    /// Wraps a transport or API failure raised while fetching one metric.
    #[error("failed to fetch {metric} for {location}: {source}")]
    FetchFailed {
        /// Metric whose fetcher failed.
        metric:   Metric,
        /// Repository the request targeted, rendered as `owner/project`.
        location: String,
        /// Error reported by the hosting API client.
        source:   AppError
    },
    /// Returned when the task evaluating a repository died without a result.
    #[error("evaluation of {location} aborted: {message}")]
    WorkerFailed {
        /// Location of the repository the task was evaluating.
        location: String,
        /// Description of the task failure.
        message:  String
    },
    /// Wraps I/O errors that occur while reading the repository list.
    #[error("failed to read repositories from {path:?}: {source}")]
    ConfigRead {
        /// Location of the repository list.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors for the repository list.
    #[error("failed to parse repositories from {path:?}: {source}")]
    ConfigParse {
        /// Location of the repository list.
        path:   PathBuf,
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps I/O errors that occur while reading the API token.
    #[error("failed to read API token from {path:?}: {source}")]
    CredentialRead {
        /// Location of the token file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Returned when the token file contains only whitespace.
    #[error("API token file {path:?} is empty")]
    CredentialEmpty {
        /// Location of the token file.
        path: PathBuf
    },
    /// Returned when the GitHub client cannot be constructed.
    #[error("failed to initialize GitHub client: {message}")]
    Client {
        /// Human readable message describing the failure.
        message: String
    },
    /// Returned when the command line is missing required input.
    #[error("usage error: {message}")]
    Usage {
        /// Human readable message describing the misuse.
        message: String
    }
}

impl Error {
    /// Constructs a usage error from the provided message.
    pub fn usage<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Usage {
            message: message.into()
        }
    }

    /// Constructs a client construction error from the provided message.
    pub fn client<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Client {
            message: message.into()
        }
    }

    /// Returns `true` for failures that only affect a single repository.
    ///
    /// Such errors are attached to the repository's result and rendered as
    /// `unknown` cells instead of terminating the invocation.
    pub fn is_repository_local(&self) -> bool {
        matches!(
            self,
            Self::MalformedLocation { .. } | Self::FetchFailed { .. } | Self::WorkerFailed { .. }
        )
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

/// Creates an [`Error::ConfigRead`] variant capturing the failing path and
/// source.
pub fn config_read_error(path: &Path, source: std::io::Error) -> Error {
    Error::ConfigRead {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::CredentialRead`] variant capturing the failing path and
/// source.
pub fn credential_read_error(path: &Path, source: std::io::Error) -> Error {
    Error::CredentialRead {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use masterror::AppError;

    use super::Error;
    use crate::metric::Metric;

    #[test]
    fn usage_constructor_populates_message() {
        let error = Error::usage("missing argument");
        match error {
            Error::Usage {
                ref message
            } => {
                assert_eq!(message, "missing argument");
            }
            other => panic!("expected usage error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::usage("display me");
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn config_read_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/repos.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::config_read_error(path, io_error);

        match error {
            Error::ConfigRead {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected config read error, got {other:?}")
        }
    }

    #[test]
    fn repository_local_classification() {
        let malformed = Error::MalformedLocation {
            location: "broken".to_owned()
        };
        let fetch = Error::FetchFailed {
            metric:   Metric::Issues,
            location: "octocat/hello".to_owned(),
            source:   AppError::service("boom")
        };
        let worker = Error::WorkerFailed {
            location: "octocat/hello".to_owned(),
            message:  "task panicked".to_owned()
        };
        let credential = Error::CredentialEmpty {
            path: "token".into()
        };

        assert!(malformed.is_repository_local());
        assert!(fetch.is_repository_local());
        assert!(worker.is_repository_local());
        assert!(!credential.is_repository_local());
        assert!(!Error::usage("x").is_repository_local());
    }

    #[test]
    fn fetch_failed_message_names_metric_and_location() {
        let error = Error::FetchFailed {
            metric:   Metric::Contributors,
            location: "octocat/hello".to_owned(),
            source:   AppError::service("rate limited")
        };
        let message = error.to_string();
        assert!(message.contains("contributors"));
        assert!(message.contains("octocat/hello"));
        assert!(message.contains("rate limited"));
    }
}
