//! Error type shared by every stage of the release pipeline.

use thiserror::Error;

use crate::exec::ExecError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a pipeline stage. Nothing is retried; the first error aborts
/// the run.
#[derive(Error, Debug)]
pub enum Error {
    /// The origin remote is not a GitHub clone URL.
    #[error("Invalid GitHub remote url: {0}")]
    InvalidRemote(String),

    /// The manifest file does not exist.
    #[error("Could not find file {0}")]
    ManifestNotFound(String),

    /// The manifest file exists but is not a valid manifest.
    #[error("Could not parse {path}: {source}")]
    ManifestParse {
        /// Manifest path.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The repository has no GitHub releases.
    #[error("{0} has no releases")]
    NoReleases(String),

    /// The latest release has no installable assets.
    #[error("Release {tag} of {repo} has no package assets")]
    NoPackages {
        /// Repository (`owner/repo`).
        repo: String,
        /// Release tag.
        tag: String,
    },

    /// The user has not forked the catalog repository.
    #[error(
        "Looks like you don't have a fork of the '{repo}' repo in your user '{user}'. \
         Please fork the repo '{upstream}' in your user '{user}' or set an explicit \
         github user with the 'config' command"
    )]
    ForkMissing {
        /// Catalog repository name.
        repo: String,
        /// Account the fork was looked up under.
        user: String,
        /// Clone URL of the upstream catalog.
        upstream: String,
    },

    /// A redirect response carried no `location` header.
    #[error("Server returned {status} but no location header was present ({url})")]
    MissingLocation {
        /// Requested URL.
        url: String,
        /// Redirect status code.
        status: u16,
    },

    /// A checksum request was redirected more often than allowed.
    #[error("Too many redirects while fetching {0}")]
    TooManyRedirects(String),

    /// A checksum file had no content.
    #[error("Checksum file {0} is empty")]
    EmptyChecksum(String),

    /// `version` is not a semantic version.
    #[error("Could not parse version {version}: {source}")]
    Version {
        /// The offending version string.
        version: String,
        /// Underlying parse error.
        source: semver::Error,
    },

    /// The configuration file could not be located or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// A `git` invocation failed.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// HTTP transport or status error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
