use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;

pub fn run(config_path: Option<PathBuf>, account: Option<String>) -> Result<()> {
    println!("Initialising land registry...\n");

    let config_path = match config_path {
        Some(path) => path,
        None => Config::config_file()?,
    };

    let mut config = Config::with_certificate_dir(Config::default_certificate_dir()?);
    if let Some(account) = account {
        config.account = account;
    }

    write_config(&config_path, &config)?;

    println!("Account:      {}", config.account);
    println!("Certificates: {}", config.certificate_dir.display());
    println!("Config:       {}", config_path.display());
    println!("Start a session with: registry shell");
    println!("Initialisation complete!");

    Ok(())
}

pub fn write_config(config_path: &Path, config: &Config) -> Result<()> {
    if config_path.exists() {
        bail!("Config already exists at: {}", config_path.display())
    }

    std::fs::create_dir_all(&config.certificate_dir)
        .context("Failed to create certificates directory")?;
    info!(dir = %config.certificate_dir.display(), "Created certificates directory");

    config.save_to(config_path)?;
    info!(path = %config_path.display(), "Wrote config");

    Ok(())
}
