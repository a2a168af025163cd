//! Minimal, unauthenticated GitHub REST client.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::remote::RepoKey;
use crate::{Error, Result};

/// Public GitHub API endpoint.
pub const GITHUB_API: &str = "https://api.github.com";

/// A release as returned by `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Git tag the release was cut from.
    pub tag_name: String,
    /// Uploaded files.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// File name.
    pub name: String,
    /// Public download URL.
    pub browser_download_url: String,
}

/// GitHub API client bound to an API base URL.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    /// Client for the public GitHub API.
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API)
    }

    /// Client for an alternative API base (tests, GitHub Enterprise mirrors).
    pub fn with_base_url(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// All releases of `repo`, newest first as ordered by GitHub.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status or an
    /// unexpected response body.
    pub async fn releases(&self, repo: &RepoKey) -> Result<Vec<Release>> {
        let url = format!("{}/repos/{}/{}/releases", self.api_base, repo.owner, repo.repo);
        tracing::debug!("Fetching releases from {url}");

        let releases = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Release>>()
            .await?;

        Ok(releases)
    }

    /// The most recent release of `repo`.
    ///
    /// GitHub's ordering is trusted: the first entry is taken as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoReleases`] if the repository has none, or any error
    /// from [`GitHubClient::releases`].
    pub async fn latest_release(&self, repo: &RepoKey) -> Result<Release> {
        self.releases(repo)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoReleases(repo.to_string()))
    }

    /// Whether `GET /repos/{owner}/{repo}` finds the repository.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an error status other than
    /// 404.
    pub async fn repo_exists(&self, repo: &RepoKey) -> Result<bool> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.repo);
        tracing::debug!("Checking {url}");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        resp.error_for_status()?;

        Ok(true)
    }
}
