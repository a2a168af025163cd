//! `config`: store the publishing preferences.

use std::io::{BufRead, Write};
use std::path::Path;

use addon_core::Config;
use anyhow::{Context, Result};

use crate::ui::Output;

/// Values given on the command line; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub github_user: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.github_user.is_none() && self.user_name.is_none() && self.user_email.is_none()
    }

    /// Merge into `config`. Empty strings clear a value.
    pub fn apply(self, config: &mut Config) {
        fn merge(slot: &mut Option<String>, value: Option<String>) {
            if let Some(value) = value {
                *slot = Some(value).filter(|v| !v.trim().is_empty());
            }
        }
        merge(&mut config.github_user, self.github_user);
        merge(&mut config.user_name, self.user_name);
        merge(&mut config.user_email, self.user_email);
    }
}

fn ask(input: &mut impl BufRead, question: &str, current: Option<&str>) -> Result<Option<String>> {
    print!("{question} [{}] ", current.unwrap_or(""));
    std::io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn prompt(config: &Config) -> Result<ConfigUpdate> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    Ok(ConfigUpdate {
        github_user: ask(
            &mut input,
            "What is your github username (used to locate your addon-list fork)?",
            config.github_user(),
        )?,
        user_name: ask(
            &mut input,
            "What is your full name (used for git commits)?",
            config.user_name(),
        )?,
        user_email: ask(
            &mut input,
            "What is your email (used for git commits)?",
            config.user_email(),
        )?,
    })
}

/// Update the config at `path` from `update`, prompting on stdin when no
/// value was given.
pub async fn config(path: &Path, update: ConfigUpdate, dry_run: bool) -> Result<()> {
    let output = Output::new();
    let mut config = Config::load(path)
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let update = if update.is_empty() {
        prompt(&config)?
    } else {
        update
    };
    update.apply(&mut config);

    if dry_run {
        output.info(&format!("Dry run, not writing {}", path.display()));
        return Ok(());
    }

    config
        .save(path)
        .await
        .with_context(|| format!("Could not save config to {}", path.display()))?;
    output.success(&format!("Saved {}", path.display()));

    Ok(())
}
