//! Release pipeline for WebThings gateway addons.
//!
//! Turns the latest GitHub release of an addon repository into a catalog
//! descriptor and proposes it to `WebThingsIO/addon-list` as a branch on the
//! author's fork:
//!
//! ```text
//! manifest.json ─┐
//! origin remote ─┼─> releases ─> packages ─> sort ─> Addon ─> clone/branch/commit/push
//! ```
//!
//! Every external effect goes through [`GitHubClient`], [`ChecksumFetcher`]
//! or a [`GitRunner`], so the whole pipeline can run against mocks.

pub mod bump;
pub mod checksum;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod exec;
pub mod github;
pub mod manifest;
pub mod publish;
pub mod remote;
pub mod resolver;

pub use checksum::ChecksumFetcher;
pub use config::Config;
pub use error::{Error, Result};
pub use exec::{ExecError, Git, GitRunner};
pub use github::GitHubClient;
pub use publish::{CatalogPublisher, CatalogRepo, PublishOptions, PublishReport};
pub use remote::RepoKey;

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("webthings-addon-cli/", env!("CARGO_PKG_VERSION"));
