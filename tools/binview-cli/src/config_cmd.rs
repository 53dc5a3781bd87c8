//! Config command - show, locate or initialise config.toml

use anyhow::{Context, Result};
use binview_shared::config::{self, Config};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Load the config from `--config` if given, else from the platform directory.
///
/// An explicit file must exist and parse; the platform file falls back to
/// defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Ok(config::load_from(path)?),
        None => Ok(config::load()),
    }
}

fn target_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(config::config_path)
        .context("Could not determine the configuration directory")
}

/// Execute a config subcommand
pub fn execute(command: ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let current = load_config(explicit)?;
            print!("{}", toml::to_string_pretty(&current)?);
        }
        ConfigCommand::Path => {
            println!("{}", target_path(explicit)?.display());
        }
        ConfigCommand::Init { force } => {
            let path = target_path(explicit)?;
            init(&path, force)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config::save_to(&Config::default(), path)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(())
}
