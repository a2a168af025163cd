//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use addon_core::{ExecError, GitRunner};
use addon_schema::{GatewaySpecificSettings, Manifest, WebthingsSettings};
use async_trait::async_trait;

pub const DIGEST: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

/// One recorded `git` invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// Records every `git` call instead of running it. `clone` creates the
/// target directory (with `addons/<existing>.json` when asked), and the
/// subcommand named by `fail_on` fails with a canned stderr.
#[derive(Default)]
pub struct FakeGit {
    pub calls: Mutex<Vec<Call>>,
    pub existing: Option<String>,
    pub fail_on: Option<&'static str>,
    pub stdout: Vec<(&'static str, String)>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(id: &str) -> Self {
        Self {
            existing: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_on(subcommand: &'static str) -> Self {
        Self {
            fail_on: Some(subcommand),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.args.join(" ")).collect()
    }
}

#[async_trait]
impl GitRunner for FakeGit {
    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> Result<String, ExecError> {
        self.calls.lock().unwrap().push(Call {
            args: args.iter().map(ToString::to_string).collect(),
            cwd: cwd.map(Path::to_path_buf),
        });

        if self.fail_on == args.first().copied() {
            return Err(ExecError::Failed {
                command: format!("git {}", args.join(" ")),
                status: Some(128),
                stderr: format!("fatal: {} rejected\n", args[0]),
            });
        }

        if args.first() == Some(&"clone") {
            let dir = cwd.expect("clone needs a cwd").join(args[2]);
            std::fs::create_dir_all(dir.join("addons")).unwrap();
            if let Some(id) = &self.existing {
                std::fs::write(dir.join("addons").join(format!("{id}.json")), "{}\n").unwrap();
            }
        }

        let out = self
            .stdout
            .iter()
            .find(|(sub, _)| Some(sub) == args.first())
            .map(|(_, out)| out.clone())
            .unwrap_or_default();
        Ok(out)
    }
}

pub fn manifest(exec: &str) -> Manifest {
    Manifest {
        id: "foo".to_string(),
        name: "Foo".to_string(),
        version: "1.2.0".to_string(),
        description: "Foo adapter".to_string(),
        author: "Jane".to_string(),
        homepage_url: "https://github.com/jane/foo".to_string(),
        gateway_specific_settings: GatewaySpecificSettings {
            webthings: WebthingsSettings {
                exec: exec.to_string(),
                strict_min_version: "0.10.0".to_string(),
                strict_max_version: None,
                primary_type: "adapter".to_string(),
            },
        },
    }
}
