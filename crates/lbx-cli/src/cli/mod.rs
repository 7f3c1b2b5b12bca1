//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use lbx_core::config::{paths, Config};
use lbx_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "lbx")]
#[command(version = "1.0")]
#[command(about = "LBX terminal banking client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the ledger service base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },

        // default to the interactive client
        None => {
            let mut config = Config::load().context("load config")?;
            if let Some(url) = cli.base_url {
                config.base_url = url;
            }

            // The guard flushes buffered log lines on drop
            let _log_guard = logging::init(&paths::logs_dir()).context("init logging")?;
            tracing::info!(base_url = %config.base_url, "starting interactive client");

            lbx_tui::run(config).await
        }
    }
}
