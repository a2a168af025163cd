//! webthings-addon-cli - WebThings addon release tooling

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use addon_cli::cmd;
use addon_cli::cmd::config::ConfigUpdate;
use addon_cli::cmd::release_update::ReleaseUpdate;
use addon_cli::ui::Output;
use addon_cli::{Cli, Commands};
use addon_core::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        Output::new().error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let dry_run = cli.dry_run;
    let config_path = cmd::config_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Config {
            github_user,
            user_name,
            user_email,
        } => {
            let update = ConfigUpdate {
                github_user,
                user_name,
                user_email,
            };
            cmd::config::config(&config_path, update, dry_run).await
        }
        Commands::PrepareUpdate { level } => {
            cmd::prepare_update::prepare_update(level.into(), dry_run).await
        }
        Commands::ReleaseUpdate {
            manifest,
            keep_workdir,
            api_url,
        } => {
            let config = Config::load(&config_path).await?;
            let opts = ReleaseUpdate {
                manifest: &manifest,
                keep_workdir,
                api_url: &api_url,
                dry_run,
            };
            cmd::release_update::release_update(&config, &opts).await
        }
    }
}
