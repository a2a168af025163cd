//! Assembling the catalog descriptor.

use addon_schema::{Addon, Manifest, Package};

use crate::checksum::ChecksumFetcher;
use crate::github::GitHubClient;
use crate::remote::RepoKey;
use crate::resolver::resolve_packages;
use crate::Result;

/// Combine manifest fields, the repository and the resolved packages.
///
/// `license_url` is derived from the repository, never read from the
/// manifest.
pub fn assemble_addon(repo: &RepoKey, manifest: &Manifest, packages: Vec<Package>) -> Addon {
    Addon {
        id: manifest.id.clone(),
        name: manifest.name.clone(),
        description: manifest.description.clone(),
        author: manifest.author.clone(),
        homepage_url: manifest.homepage_url.clone(),
        license_url: repo.license_url(),
        primary_type: manifest.webthings().primary_type.clone(),
        packages,
    }
}

/// Resolve the latest release of `repo` and assemble its descriptor.
///
/// # Errors
///
/// Propagates any error from [`resolve_packages`].
pub async fn build_addon(
    github: &GitHubClient,
    checksums: &ChecksumFetcher,
    repo: &RepoKey,
    manifest: &Manifest,
) -> Result<Addon> {
    let packages = resolve_packages(github, checksums, repo, manifest).await?;
    Ok(assemble_addon(repo, manifest, packages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use addon_schema::{GatewaySpecificSettings, WebthingsSettings};

    fn manifest() -> Manifest {
        Manifest {
            id: "foo".to_string(),
            name: "Foo".to_string(),
            version: "1.2.0".to_string(),
            description: "Foo adapter".to_string(),
            author: "Jane".to_string(),
            homepage_url: "https://github.com/jane/foo".to_string(),
            gateway_specific_settings: GatewaySpecificSettings {
                webthings: WebthingsSettings {
                    exec: "{nodeLoader} {path}".to_string(),
                    strict_min_version: "0.10.0".to_string(),
                    strict_max_version: Some("1.0.0".to_string()),
                    primary_type: "notifier".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_assemble_copies_manifest_fields() {
        let addon = assemble_addon(&RepoKey::new("jane", "foo-repo"), &manifest(), Vec::new());

        assert_eq!(addon.id, "foo");
        assert_eq!(addon.name, "Foo");
        assert_eq!(addon.description, "Foo adapter");
        assert_eq!(addon.author, "Jane");
        assert_eq!(addon.homepage_url, "https://github.com/jane/foo");
        assert_eq!(addon.primary_type, "notifier");
        assert_eq!(
            addon.license_url,
            "https://raw.githubusercontent.com/jane/foo-repo/master/LICENSE"
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let repo = RepoKey::new("jane", "foo");
        let a = assemble_addon(&repo, &manifest(), Vec::new())
            .to_catalog_json()
            .unwrap();
        let b = assemble_addon(&repo, &manifest(), Vec::new())
            .to_catalog_json()
            .unwrap();
        assert_eq!(a, b);
    }
}
