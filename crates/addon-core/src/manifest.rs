//! Loading the addon's `manifest.json`.

use std::path::Path;

use addon_schema::Manifest;

use crate::{Error, Result};

/// Default manifest location, relative to the addon repository root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Read and parse the manifest at `path`.
///
/// # Errors
///
/// Returns [`Error::ManifestNotFound`] if the file does not exist and
/// [`Error::ManifestParse`] if it is not a valid manifest.
pub async fn load_manifest(path: &Path) -> Result<Manifest> {
    let display = path.display().to_string();
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(Error::ManifestNotFound(display));
    }

    let content = tokio::fs::read_to_string(path).await?;
    Manifest::from_json(&content).map_err(|source| Error::ManifestParse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        let err = load_manifest(&path).await.unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound(_)));
        assert!(err.to_string().starts_with("Could not find file"));
    }

    #[tokio::test]
    async fn test_invalid_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, r#"{"id": "foo"}"#).unwrap();
        assert!(matches!(
            load_manifest(&path).await,
            Err(Error::ManifestParse { .. })
        ));
    }
}
