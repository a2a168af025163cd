//! `prepare-update`: bump, commit and tag a new addon version.

use addon_core::Git;
use addon_core::bump::{BumpLevel, bump_version, prepare_update as bump_and_tag};
use addon_core::manifest::{MANIFEST_FILE, load_manifest};
use anyhow::{Context, Result};

use crate::ui::Output;

pub async fn prepare_update(level: BumpLevel, dry_run: bool) -> Result<()> {
    let output = Output::new();
    let dir = std::env::current_dir().context("Failed to read the current directory")?;

    if dry_run {
        let manifest = load_manifest(&dir.join(MANIFEST_FILE)).await?;
        let next = bump_version(&manifest.version, level)?;
        output.info(&format!(
            "Would release {} -> {next} (dry run, nothing changed)",
            manifest.version
        ));
        return Ok(());
    }

    let version = bump_and_tag(&Git::new(), &dir, level).await?;
    output.success(&format!("Tagged release {version}"));
    output.info("Push the commit and the tag to build the release assets.");

    Ok(())
}
