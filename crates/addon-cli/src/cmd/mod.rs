//! Command modules - one file per CLI command

pub mod config;
pub mod prepare_update;
pub mod release_update;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve the config file location: explicit path, else the default.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => addon_core::config::config_path().context("Failed to locate config file"),
    }
}
