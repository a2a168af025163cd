//! Fetching the published `.sha256sum` of a release asset.
//!
//! GitHub serves release downloads through a redirect to its object store,
//! so redirects are followed here by hand: a 3xx without a `location` header
//! must fail loudly instead of being swallowed by the HTTP client.

use addon_schema::Sha256Hash;
use reqwest::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use url::Url;

use crate::{Error, Result};

/// Suffix of the checksum file published next to every asset.
pub const CHECKSUM_SUFFIX: &str = "sha256sum";

/// Maximum number of redirects followed for one checksum.
pub const MAX_REDIRECTS: usize = 10;

/// Downloads checksum files, following redirects explicitly.
#[derive(Debug, Clone)]
pub struct ChecksumFetcher {
    client: Client,
}

impl ChecksumFetcher {
    /// Create a fetcher whose client does not follow redirects on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .user_agent(crate::USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Checksum of the asset at `asset_url`, read from
    /// `<asset_url>.sha256sum`.
    ///
    /// # Errors
    ///
    /// See [`ChecksumFetcher::fetch_checksum_file`].
    pub async fn fetch(&self, asset_url: &str) -> Result<Sha256Hash> {
        self.fetch_checksum_file(&format!("{asset_url}.{CHECKSUM_SUFFIX}"))
            .await
    }

    /// Download a `sha256sum` style file and return its first token.
    ///
    /// The file format is `<hex>  <filename>`; only the digest is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLocation`] for a redirect without a target,
    /// [`Error::TooManyRedirects`] past [`MAX_REDIRECTS`] hops,
    /// [`Error::EmptyChecksum`] for an empty body and [`Error::Http`] for a
    /// transport failure or error status.
    pub async fn fetch_checksum_file(&self, url: &str) -> Result<Sha256Hash> {
        let mut current = Url::parse(url)?;

        for _ in 0..=MAX_REDIRECTS {
            let resp = self.client.get(current.clone()).send().await?;
            let status = resp.status();

            if status.is_redirection() {
                let location = resp
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| Error::MissingLocation {
                        url: current.to_string(),
                        status: status.as_u16(),
                    })?;
                let next = current.join(location)?;
                tracing::info!("Following redirect to {next}");
                current = next;
                continue;
            }

            let text = resp.error_for_status()?.text().await?;
            let digest = text
                .split_whitespace()
                .next()
                .ok_or_else(|| Error::EmptyChecksum(current.to_string()))?;

            let hash = Sha256Hash::new(digest);
            if !hash.is_well_formed() {
                tracing::warn!("Checksum from {current} does not look like a sha256: {hash}");
            }
            return Ok(hash);
        }

        Err(Error::TooManyRedirects(url.to_string()))
    }
}
