//! Turning a GitHub release into the ordered package list of an addon.
//!
//! Asset classification is plain substring matching on the download URL and
//! on the manifest's `exec` template. The tokens are what the catalog's
//! consumers expect, so they are matched exactly rather than generalized.

use std::cmp::Ordering;

use addon_schema::{
    Architecture, Gateway, Language, LanguageName, Manifest, NODE_ABI_VERSIONS, Package,
};

use crate::checksum::{CHECKSUM_SUFFIX, ChecksumFetcher};
use crate::github::{GitHubClient, Release, ReleaseAsset};
use crate::remote::RepoKey;
use crate::{Error, Result};

/// Marker in `exec` identifying a python addon.
const PYTHON_MARKER: &str = "python";

/// Marker in `exec` identifying an addon started by the gateway's node loader.
const NODE_LOADER_MARKER: &str = "nodeLoader";

/// How a package list is ordered before publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// By node module ABI rank, then architecture rank.
    Node,
    /// By python version rank, then architecture rank.
    Python,
    /// Keep discovery order.
    Preserve,
}

impl SortPolicy {
    /// Pick the policy for a package list. Lists mixing languages, and
    /// language independent lists, keep their order.
    pub fn for_packages(packages: &[Package]) -> Self {
        let Some(first) = packages.first() else {
            return Self::Preserve;
        };
        let name = first.language.name;
        if packages.iter().any(|p| p.language.name != name) {
            return Self::Preserve;
        }
        match name {
            LanguageName::Nodejs => Self::Node,
            LanguageName::Python => Self::Python,
            LanguageName::Any => Self::Preserve,
        }
    }

    /// Comparator for this policy.
    pub fn compare(self, a: &Package, b: &Package) -> Ordering {
        let by_arch = || a.architecture.rank().cmp(&b.architecture.rank());
        match self {
            Self::Node => a
                .language
                .node_abi_rank()
                .cmp(&b.language.node_abi_rank())
                .then_with(by_arch),
            Self::Python => a
                .language
                .python_rank()
                .cmp(&b.language.python_rank())
                .then_with(by_arch),
            Self::Preserve => Ordering::Equal,
        }
    }
}

/// Sort packages into installer priority order. The sort is stable, so
/// [`SortPolicy::Preserve`] leaves the list untouched.
pub fn sort_packages(packages: &mut [Package]) {
    let policy = SortPolicy::for_packages(packages);
    tracing::debug!("Sorting {} packages with {policy:?}", packages.len());
    packages.sort_by(|a, b| policy.compare(a, b));
}

/// Node module ABI a download URL was built for.
///
/// A `v<major>` token in the file name (`foo-1.0.0-linux-arm-v10.tgz`) is
/// looked for first, then a `node<abi>` token (`foo-1.0.0-node83.tgz`).
/// Bare numbers are never read as an ABI since they belong to the addon
/// version. Table order decides ties: the last matching entry wins.
pub fn detect_node_abi(url: &str) -> Option<u32> {
    let file_name = url.rsplit('/').next().unwrap_or(url);
    let tokens: Vec<&str> = file_name
        .split(['-', '_', '.'])
        .filter(|t| !t.is_empty())
        .collect();

    let by_major = NODE_ABI_VERSIONS
        .iter()
        .rev()
        .find(|(major, _)| {
            let tag = format!("v{major}");
            tokens.iter().any(|t| *t == tag)
        })
        .map(|(_, abi)| *abi);
    if by_major.is_some() {
        return by_major;
    }

    NODE_ABI_VERSIONS
        .iter()
        .rev()
        .find(|(_, abi)| {
            let tag = format!("node{abi}");
            tokens.iter().any(|t| *t == tag)
        })
        .map(|(_, abi)| *abi)
}

/// Language block for an asset, from the manifest's `exec` template and the
/// asset URL. A node loader marker takes precedence over `python`.
pub fn detect_language(exec: &str, url: &str) -> Language {
    if exec.contains(NODE_LOADER_MARKER) {
        Language::nodejs(detect_node_abi(url))
    } else if exec.contains(PYTHON_MARKER) {
        Language::python()
    } else {
        Language::any()
    }
}

/// Release assets that are installable packages, i.e. not checksum files.
pub fn package_assets(release: &Release) -> impl Iterator<Item = &ReleaseAsset> {
    release
        .assets
        .iter()
        .filter(|asset| !asset.name.ends_with(CHECKSUM_SUFFIX))
}

/// Build the package for one asset, fetching its checksum.
///
/// # Errors
///
/// Returns an error if the checksum cannot be fetched.
pub async fn create_package(
    checksums: &ChecksumFetcher,
    url: &str,
    manifest: &Manifest,
) -> Result<Package> {
    tracing::info!("Creating package for {url}");

    let settings = manifest.webthings();
    let checksum = checksums.fetch(url).await?;

    Ok(Package {
        architecture: Architecture::detect(url),
        language: detect_language(&settings.exec, url),
        version: manifest.version.clone(),
        url: url.to_string(),
        checksum,
        gateway: Gateway::new(
            settings.strict_min_version.clone(),
            settings.strict_max_version.as_deref(),
        ),
    })
}

/// Resolve the sorted package list of the latest release of `repo`.
///
/// Assets are processed one at a time in release order.
///
/// # Errors
///
/// Returns [`Error::NoReleases`] when the repository has no release,
/// [`Error::NoPackages`] when the latest release only carries checksum
/// files, and any API or checksum error.
pub async fn resolve_packages(
    github: &GitHubClient,
    checksums: &ChecksumFetcher,
    repo: &RepoKey,
    manifest: &Manifest,
) -> Result<Vec<Package>> {
    let release = github.latest_release(repo).await?;
    tracing::info!("Latest release of {repo} is {}", release.tag_name);

    let mut packages = Vec::new();
    for asset in package_assets(&release) {
        let package = create_package(checksums, &asset.browser_download_url, manifest).await?;
        packages.push(package);
    }

    if packages.is_empty() {
        return Err(Error::NoPackages {
            repo: repo.to_string(),
            tag: release.tag_name,
        });
    }

    sort_packages(&mut packages);
    Ok(packages)
}
