//! Proposing a descriptor to the addon catalog.
//!
//! The catalog is updated through a pull request from the author's fork, so
//! publishing means: clone upstream, add the fork as a remote, commit
//! `addons/<id>.json` on a predictable branch and force-push that branch to
//! the fork. Steps run strictly in order and the first failure aborts; a
//! pushed branch is never rolled back.

use std::fmt;
use std::path::{Path, PathBuf};

use addon_schema::Addon;

use crate::config::Config;
use crate::exec::GitRunner;
use crate::github::GitHubClient;
use crate::remote::RepoKey;
use crate::{Error, Result};

/// Owner of the upstream catalog repository.
pub const CATALOG_OWNER: &str = "WebThingsIO";

/// Name of the catalog repository (and of the fork).
pub const CATALOG_REPO: &str = "addon-list";

/// Remote name under which the fork is registered in the clone.
pub const FORK_REMOTE: &str = "fork";

/// Directory of descriptors inside the catalog.
pub const ADDONS_DIR: &str = "addons";

/// The catalog repository descriptors are published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRepo {
    /// Upstream owner.
    pub owner: String,
    /// Repository name, shared by upstream and forks.
    pub name: String,
}

impl Default for CatalogRepo {
    fn default() -> Self {
        Self {
            owner: CATALOG_OWNER.to_string(),
            name: CATALOG_REPO.to_string(),
        }
    }
}

impl CatalogRepo {
    /// HTTPS clone URL of upstream.
    pub fn upstream_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }

    /// SSH push URL of `user`'s fork.
    pub fn fork_url(&self, user: &str) -> String {
        format!("git@github.com:{user}/{}.git", self.name)
    }

    /// Descriptor path of addon `id`, relative to the clone root.
    pub fn descriptor_path(id: &str) -> PathBuf {
        Path::new(ADDONS_DIR).join(format!("{id}.json"))
    }
}

/// Whether a publish adds a new addon or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// No descriptor for the id existed yet.
    Add,
    /// A descriptor for the id already existed.
    Update,
}

/// Branch name and commit message of one publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPlan {
    /// Add or update.
    pub kind: ChangeKind,
    /// Branch pushed to the fork.
    pub branch: String,
    /// Commit message.
    pub message: String,
}

impl BranchPlan {
    /// Plan for addon `id` at `version`, depending on whether its descriptor
    /// already exists in the catalog.
    ///
    /// ```
    /// use addon_core::publish::BranchPlan;
    ///
    /// assert_eq!(BranchPlan::new("foo", "1.2.0", false).branch, "add-foo");
    /// assert_eq!(BranchPlan::new("foo", "1.2.0", true).branch, "update-foo-to-1.2.0");
    /// ```
    pub fn new(id: &str, version: &str, exists: bool) -> Self {
        if exists {
            Self {
                kind: ChangeKind::Update,
                branch: format!("update-{id}-to-{version}"),
                message: format!("Update {id} to {version}"),
            }
        } else {
            Self {
                kind: ChangeKind::Add,
                branch: format!("add-{id}"),
                message: format!("Add {id}"),
            }
        }
    }
}

/// Knobs for [`CatalogPublisher`].
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Catalog to publish to.
    pub catalog: CatalogRepo,
    /// Leave the temporary clone on disk instead of deleting it.
    pub keep_workdir: bool,
}

/// Outcome of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// Fork the branch was pushed to.
    pub fork: RepoKey,
    /// Branch and commit message used.
    pub plan: BranchPlan,
    /// Clone directory, when kept.
    pub workdir: Option<PathBuf>,
}

/// Drives the clone/branch/commit/push sequence against the catalog.
pub struct CatalogPublisher<'a> {
    github: &'a GitHubClient,
    git: &'a dyn GitRunner,
    config: &'a Config,
    options: PublishOptions,
}

impl fmt::Debug for CatalogPublisher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogPublisher")
            .field("github", &self.github)
            .field("config", &self.config)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> CatalogPublisher<'a> {
    /// Publisher using `github` for the fork check and `git` for every
    /// repository operation.
    pub fn new(github: &'a GitHubClient, git: &'a dyn GitRunner, config: &'a Config) -> Self {
        Self {
            github,
            git,
            config,
            options: PublishOptions::default(),
        }
    }

    /// Replace the default options.
    pub fn with_options(mut self, options: PublishOptions) -> Self {
        self.options = options;
        self
    }

    /// Owner of the fork: the configured GitHub user, else `repo_user`.
    pub fn fork_owner(&self, repo_user: &str) -> String {
        self.config.github_user().unwrap_or(repo_user).to_string()
    }

    /// Push `addon` as a branch to the fork of the catalog.
    ///
    /// `repo_user` is the owner of the addon's own repository, used as the
    /// fork owner unless the config names one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForkMissing`] if the fork does not exist, and any
    /// error from the API, the filesystem or `git`. Nothing is undone on
    /// failure.
    pub async fn publish(&self, repo_user: &str, addon: &Addon) -> Result<PublishReport> {
        let catalog = &self.options.catalog;
        let version = addon.version().ok_or_else(|| Error::NoPackages {
            repo: addon.id.clone(),
            tag: "unknown".to_string(),
        })?;

        let user = self.fork_owner(repo_user);
        let fork = RepoKey::new(&user, &catalog.name);
        if !self.github.repo_exists(&fork).await? {
            return Err(Error::ForkMissing {
                repo: catalog.name.clone(),
                user,
                upstream: catalog.upstream_url(),
            });
        }

        let tmp = tempfile::Builder::new()
            .prefix(&format!("{}-", catalog.name))
            .tempdir()?;
        // Holding the guard deletes the clone on every exit path.
        let (_guard, root) = if self.options.keep_workdir {
            let root = tmp.keep();
            tracing::info!("Keeping catalog clone at {}", root.display());
            (None, root)
        } else {
            let root = tmp.path().to_path_buf();
            (Some(tmp), root)
        };
        let clone_dir = root.join(&catalog.name);

        self.git
            .git(
                &["clone", &catalog.upstream_url(), &catalog.name],
                Some(&root),
            )
            .await?;
        self.git
            .git(
                &["remote", "add", FORK_REMOTE, &catalog.fork_url(&user)],
                Some(&clone_dir),
            )
            .await?;

        if let Some(name) = self.config.user_name() {
            self.git
                .git(&["config", "user.name", name], Some(&clone_dir))
                .await?;
        }
        if let Some(email) = self.config.user_email() {
            self.git
                .git(&["config", "user.email", email], Some(&clone_dir))
                .await?;
        }

        let descriptor = clone_dir.join(CatalogRepo::descriptor_path(&addon.id));
        let exists = tokio::fs::try_exists(&descriptor).await?;
        let plan = BranchPlan::new(&addon.id, version, exists);
        tracing::info!("Publishing {} on branch {}", addon.id, plan.branch);

        self.git
            .git(&["checkout", "-b", &plan.branch], Some(&clone_dir))
            .await?;

        if let Some(parent) = descriptor.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&descriptor, addon.to_catalog_json()?).await?;

        self.git.git(&["status"], Some(&clone_dir)).await?;
        self.git.git(&["add", "."], Some(&clone_dir)).await?;
        self.git
            .git(&["commit", "-m", &plan.message], Some(&clone_dir))
            .await?;
        self.git
            .git(
                &["push", "-f", "--set-upstream", FORK_REMOTE, &plan.branch],
                Some(&clone_dir),
            )
            .await?;

        let workdir = self.options.keep_workdir.then_some(clone_dir);
        Ok(PublishReport {
            fork,
            plan,
            workdir,
        })
    }
}
