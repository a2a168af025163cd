//! Integration tests for the command-line binary.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test context with an isolated config location and working directory.
struct TestContext {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("home").join("config.json");
        Self {
            temp_dir,
            config_path,
        }
    }

    fn workdir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn cli(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_webthings-addon-cli");
        let mut cmd = Command::new(bin_path);
        cmd.current_dir(self.workdir());
        cmd.env("WEBTHINGS_ADDON_CLI_CONFIG", &self.config_path);
        cmd.env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.cli().arg("--help").output().expect("failed to run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("release-update"));
    assert!(stdout.contains("prepare-update"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .cli()
        .arg("--version")
        .output()
        .expect("failed to run cli");
    assert!(output.status.success());
}

#[test]
fn test_config_flags_are_saved() {
    let ctx = TestContext::new();
    let output = ctx
        .cli()
        .args(["config", "--github-user", "octo", "--user-email", "jane@example.com"])
        .output()
        .expect("failed to run cli");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text = std::fs::read_to_string(&ctx.config_path).expect("config written");
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["githubUser"], "octo");
    assert_eq!(json["userEmail"], "jane@example.com");
    assert!(json.get("userName").is_none());
}

#[test]
fn test_release_update_without_manifest_fails_cleanly() {
    let ctx = TestContext::new();
    let output = ctx
        .cli()
        .args(["release-update", "--dry-run"])
        .output()
        .expect("failed to run cli");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not find file"), "{stderr}");
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_prepare_update_dry_run_reports_next_version() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.workdir().join("manifest.json"),
        r#"{
            "id": "foo",
            "name": "Foo",
            "version": "1.2.3",
            "description": "Foo adapter",
            "author": "Jane",
            "homepage_url": "https://github.com/jane/foo",
            "gateway_specific_settings": {
                "webthings": {
                    "exec": "{nodeLoader} {path}",
                    "strict_min_version": "0.10.0",
                    "primary_type": "adapter"
                }
            }
        }"#,
    )
    .unwrap();

    let output = ctx
        .cli()
        .args(["prepare-update", "minor", "--dry-run"])
        .output()
        .expect("failed to run cli");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1.2.3 -> 1.3.0"), "{stdout}");
}

#[test]
fn test_prepare_update_rejects_unknown_level() {
    let ctx = TestContext::new();
    let output = ctx
        .cli()
        .args(["prepare-update", "huge"])
        .output()
        .expect("failed to run cli");
    assert!(!output.status.success());
}
