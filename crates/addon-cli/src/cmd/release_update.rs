//! `release-update`: publish the latest GitHub release to the catalog.

use std::path::Path;

use addon_core::descriptor::build_addon;
use addon_core::manifest::load_manifest;
use addon_core::{
    CatalogPublisher, CatalogRepo, ChecksumFetcher, Config, Git, GitHubClient, PublishOptions,
    RepoKey,
};
use anyhow::{Context, Result};

use crate::ui::Output;

/// Options of one `release-update` run.
#[derive(Debug, Clone)]
pub struct ReleaseUpdate<'a> {
    pub manifest: &'a Path,
    pub keep_workdir: bool,
    pub api_url: &'a str,
    pub dry_run: bool,
}

/// Build the descriptor for the latest release and push it to the fork of
/// the catalog, or print it when `dry_run` is set.
pub async fn release_update(config: &Config, opts: &ReleaseUpdate<'_>) -> Result<()> {
    let output = if opts.dry_run {
        Output::quiet()
    } else {
        Output::new()
    };

    let manifest = load_manifest(opts.manifest).await?;
    let git = Git::new();
    let repo = RepoKey::from_origin(&git, None)
        .await
        .context("Failed to read the origin remote")?;

    output.section(&format!(
        "Releasing {} {} from {repo}",
        manifest.id, manifest.version
    ));

    let github = GitHubClient::with_base_url(opts.api_url);
    let checksums = ChecksumFetcher::new()?;
    let addon = build_addon(&github, &checksums, &repo, &manifest).await?;
    output.success(&format!("Resolved {} package(s)", addon.packages.len()));

    if opts.dry_run {
        print!("{}", addon.to_catalog_json()?);
        return Ok(());
    }

    let options = PublishOptions {
        catalog: CatalogRepo::default(),
        keep_workdir: opts.keep_workdir,
    };
    let report = CatalogPublisher::new(&github, &git, config)
        .with_options(options)
        .publish(&repo.owner, &addon)
        .await?;

    output.success(&format!(
        "Pushed branch '{}' to {}",
        report.plan.branch, report.fork
    ));
    output.info(&format!(
        "Open a pull request: https://github.com/{}/pull/new/{}",
        report.fork, report.plan.branch
    ));
    if let Some(dir) = report.workdir {
        output.warning(&format!("Catalog clone kept at {}", dir.display()));
    }

    Ok(())
}
