mod certificate;
mod commands;
mod config;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "registry")]
#[command(author, version, about = "Simulated land registry on an in-memory chain", long_about = None)]
struct Cli {
    /// log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// custom config path (default: ~/.land_registry/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and create the certificates directory
    Init {
        /// wallet address to act as
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Interactive session over a fresh in-memory registry
    Shell,

    /// Scripted register / list / buy walkthrough
    Demo {
        /// print the final ledger as JSON
        #[arg(long)]
        json: bool,

        /// skip the artificial confirmation delays
        #[arg(long)]
        instant: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "registry_cli={level},registry_db={level}",
                level = cli.log_level
            )
            .into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { account } => {
            commands::init::run(cli.config, account)?;
        }
        Commands::Shell => {
            let config = Config::resolve(cli.config.as_deref())?;
            commands::shell::run(&config).await?;
        }
        Commands::Demo { json, instant } => {
            let config = Config::resolve(cli.config.as_deref())?;
            commands::demo::run(&config, json, instant).await?;
        }
    }
    Ok(())
}
