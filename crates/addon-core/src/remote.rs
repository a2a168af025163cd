//! Parsing the addon repository's `origin` remote.

use std::path::Path;

use crate::exec::GitRunner;
use crate::{Error, Result};

const SSH_PREFIX: &str = "git@github.com:";
const HTTPS_PREFIX: &str = "https://github.com/";

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, Hash, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RepoKey {
    /// Repository owner (GitHub user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl RepoKey {
    /// Create a new `RepoKey` from an owner and repository name.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Extract owner and repository from a GitHub clone URL.
    ///
    /// Accepts `git@github.com:owner/repo` and `https://github.com/owner/repo`,
    /// each with or without a `.git` suffix or a trailing `/`.
    ///
    /// # Example
    ///
    /// ```
    /// use addon_core::RepoKey;
    ///
    /// let ssh = RepoKey::from_remote_url("git@github.com:jane/foo-adapter.git").unwrap();
    /// let https = RepoKey::from_remote_url("https://github.com/jane/foo-adapter").unwrap();
    /// assert_eq!(ssh, https);
    /// assert_eq!(ssh.to_string(), "jane/foo-adapter");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRemote`] if the URL is not a GitHub clone URL
    /// or lacks the owner or repository segment.
    pub fn from_remote_url(remote: &str) -> Result<Self> {
        let invalid = || Error::InvalidRemote(remote.to_string());

        let rest = remote
            .strip_prefix(SSH_PREFIX)
            .or_else(|| remote.strip_prefix(HTTPS_PREFIX))
            .ok_or_else(invalid)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let rest = rest.strip_suffix(".git").unwrap_or(rest);

        let (owner, repo) = rest.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }

        Ok(Self::new(owner, repo))
    }

    /// Read `remote.origin.url` of the repository at `cwd` and parse it.
    ///
    /// # Errors
    ///
    /// Returns an error if `git config` fails (no origin configured) or the
    /// URL is not a GitHub clone URL.
    pub async fn from_origin(git: &dyn GitRunner, cwd: Option<&Path>) -> Result<Self> {
        let origin = git
            .git(&["config", "--get", "remote.origin.url"], cwd)
            .await?;
        Self::from_remote_url(origin.trim())
    }

    /// Raw URL of the `LICENSE` file on the `master` branch.
    pub fn license_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/master/LICENSE",
            self.owner, self.repo
        )
    }
}

impl std::fmt::Display for RepoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
