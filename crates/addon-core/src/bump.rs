//! Cutting a new release of the addon itself: bump the version in the
//! project files, commit and tag.

use std::path::{Path, PathBuf};

use semver::{BuildMetadata, Prerelease, Version};

use crate::exec::GitRunner;
use crate::manifest::{MANIFEST_FILE, load_manifest};
use crate::{Error, Result};

/// Files whose top level `version` is bumped, when present. Only node addons
/// have the first two.
pub const VERSIONED_FILES: [&str; 3] = ["package.json", "package-lock.json", MANIFEST_FILE];

/// Semantic version component to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    /// `x.y.Z`
    Patch,
    /// `x.Y.0`
    Minor,
    /// `X.0.0`
    Major,
}

/// Increment `version` at `level`.
///
/// A pre-release is promoted to its release instead of skipping it:
/// `1.3.0-beta.1` bumped at minor level becomes `1.3.0`, as `npm version`
/// does.
///
/// # Errors
///
/// Returns [`Error::Version`] if `version` is not a semantic version.
pub fn bump_version(version: &str, level: BumpLevel) -> Result<Version> {
    let mut v = Version::parse(version).map_err(|source| Error::Version {
        version: version.to_string(),
        source,
    })?;

    let promote = !v.pre.is_empty()
        && match level {
            BumpLevel::Patch => true,
            BumpLevel::Minor => v.patch == 0,
            BumpLevel::Major => v.minor == 0 && v.patch == 0,
        };

    if !promote {
        match level {
            BumpLevel::Patch => v.patch += 1,
            BumpLevel::Minor => {
                v.minor += 1;
                v.patch = 0;
            }
            BumpLevel::Major => {
                v.major += 1;
                v.minor = 0;
                v.patch = 0;
            }
        }
    }
    v.pre = Prerelease::EMPTY;
    v.build = BuildMetadata::EMPTY;

    Ok(v)
}

/// Rewrite the top level `version` of a JSON file, keeping key order and
/// writing two space indentation plus a trailing newline.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or written.
pub async fn patch_version_file(path: &Path, version: &str) -> Result<()> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(Error::ManifestNotFound(path.display().to_string()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let mut object: serde_json::Value = serde_json::from_str(&content)?;
    if let Some(map) = object.as_object_mut() {
        map.insert(
            "version".to_string(),
            serde_json::Value::String(version.to_string()),
        );
    }

    let mut json = serde_json::to_string_pretty(&object)?;
    json.push('\n');
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Subjects of the non-merge commits since the most recent tag, oldest
/// first, one per line. The whole history when there is no tag yet.
///
/// # Errors
///
/// Returns an error if a `git` command fails.
pub async fn release_history(git: &dyn GitRunner, cwd: &Path) -> Result<String> {
    let tags = git.git(&["tag", "--sort=creatordate"], Some(cwd)).await?;
    let range = tags
        .lines()
        .map(str::trim)
        .rfind(|t| !t.is_empty())
        .map(|latest| format!("{latest}..HEAD"));

    let mut args = vec!["log", "--pretty=format:%s", "--reverse", "--no-merges"];
    if let Some(range) = range.as_deref() {
        args.push(range);
    }

    let log = git.git(&args, Some(cwd)).await?;
    Ok(log.trim().to_string())
}

/// Bump the version of the addon at `dir`, commit the changed files as
/// `Release <version>` with the history since the last tag, and tag the
/// commit. Returns the new version.
///
/// # Errors
///
/// Returns an error if the manifest is missing or invalid, the version is
/// not semantic, a file cannot be rewritten or a `git` command fails.
pub async fn prepare_update(git: &dyn GitRunner, dir: &Path, level: BumpLevel) -> Result<Version> {
    let manifest = load_manifest(&dir.join(MANIFEST_FILE)).await?;
    let new_version = bump_version(&manifest.version, level)?;
    let version = new_version.to_string();

    let mut files: Vec<&str> = Vec::new();
    for file in VERSIONED_FILES {
        let path: PathBuf = dir.join(file);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!("Found {file}");
            files.push(file);
        }
    }

    for file in &files {
        patch_version_file(&dir.join(file), &version).await?;
    }

    let mut message = format!("Release {version}");
    let log = release_history(git, dir).await?;
    if !log.is_empty() {
        message.push_str("\n\n");
        message.push_str(&log);
    }

    let mut add = vec!["add"];
    add.extend(files.iter().copied());
    git.git(&add, Some(dir)).await?;
    git.git(&["commit", "-m", &message], Some(dir)).await?;
    git.git(&["tag", &version], Some(dir)).await?;

    Ok(new_version)
}
