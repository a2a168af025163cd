//! webthings-addon-cli - release tooling for WebThings gateway addons
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Run from the root of an addon repository:
//!
//! ```text
//! webthings-addon-cli prepare-update minor   # bump, commit and tag
//! git push --follow-tags                     # CI builds the release assets
//! webthings-addon-cli release-update         # propose the release to the catalog
//! ```
//!
//! Preferences live in `~/.webthings-addon-cli/config.json` and are edited
//! with `webthings-addon-cli config`.

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use addon_core::bump::BumpLevel;

#[derive(Debug, Parser)]
#[command(name = "webthings-addon-cli")]
#[command(author, version, about = "Release WebThings gateway addons to the addon catalog")]
pub struct Cli {
    /// Show what would happen without making changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (default: ~/.webthings-addon-cli/config.json)
    #[arg(long, global = true, env = "WEBTHINGS_ADDON_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store the GitHub user and commit identity used for publishing
    Config {
        /// GitHub user holding your fork of addon-list
        #[arg(long)]
        github_user: Option<String>,
        /// Full name used for catalog commits
        #[arg(long)]
        user_name: Option<String>,
        /// Email used for catalog commits
        #[arg(long)]
        user_email: Option<String>,
    },
    /// Bump the addon version, commit and tag the release
    PrepareUpdate {
        /// Version component to increment
        #[arg(value_enum)]
        level: Level,
    },
    /// Publish the latest GitHub release to the addon catalog
    ReleaseUpdate {
        /// Addon manifest to read
        #[arg(long, default_value = "manifest.json")]
        manifest: PathBuf,
        /// Keep the temporary catalog clone after publishing
        #[arg(long)]
        keep_workdir: bool,
        /// GitHub API base URL
        #[arg(
            long,
            env = "GITHUB_API_URL",
            default_value = addon_core::github::GITHUB_API,
            hide = true
        )]
        api_url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Patch,
    Minor,
    Major,
}

impl From<Level> for BumpLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Patch => Self::Patch,
            Level::Minor => Self::Minor,
            Level::Major => Self::Major,
        }
    }
}
