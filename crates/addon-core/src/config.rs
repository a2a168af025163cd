//! User preferences for publishing, stored as JSON in the home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "WEBTHINGS_ADDON_CLI_HOME";

/// Publishing preferences. Every field is optional; an absent value skips
/// the corresponding step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// GitHub account holding the catalog fork, instead of the addon
    /// repository's owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_user: Option<String>,
    /// `user.name` for the catalog commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// `user.email` for the catalog commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Configuration directory: `$WEBTHINGS_ADDON_CLI_HOME` or
/// `~/.webthings-addon-cli`. `None` if the home directory is unknown.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(val) = std::env::var(HOME_ENV) {
        return Some(PathBuf::from(val));
    }
    dirs::home_dir().map(|h| h.join(".webthings-addon-cli"))
}

/// Default configuration file path.
///
/// # Errors
///
/// Returns [`Error::Config`] if no home directory can be determined.
pub fn config_path() -> Result<PathBuf> {
    config_dir()
        .map(|dir| dir.join("config.json"))
        .ok_or_else(|| Error::Config(format!("Could not determine home directory. Set {HOME_ENV}.")))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load the configuration at `path`; a missing file is an empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Write the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Configured fork owner, ignoring blank values.
    pub fn github_user(&self) -> Option<&str> {
        non_empty(self.github_user.as_ref())
    }

    /// Configured commit author name, ignoring blank values.
    pub fn user_name(&self) -> Option<&str> {
        non_empty(self.user_name.as_ref())
    }

    /// Configured commit author email, ignoring blank values.
    pub fn user_email(&self) -> Option<&str> {
        non_empty(self.user_email.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.json")).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            github_user: Some("jane".to_string()),
            user_name: Some("Jane Doe".to_string()),
            user_email: None,
        };

        config.save(&path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"githubUser\": \"jane\""));
        assert!(!text.contains("userEmail"));

        assert_eq!(Config::load(&path).await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path).await, Err(Error::Config(_))));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config {
            github_user: Some("  ".to_string()),
            user_name: Some(String::new()),
            user_email: Some("jane@example.com".to_string()),
        };
        assert_eq!(config.github_user(), None);
        assert_eq!(config.user_name(), None);
        assert_eq!(config.user_email(), Some("jane@example.com"));
    }
}
