//! The `clipsift config` command for configuration management.

use std::path::Path;

use clap::{Args, Subcommand};
use clipsift_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    let path = Config::default_path();
    match args.command {
        ConfigCommand::Show => show(&path),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommand::Init { force } => {
            write_initial_config(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
            Ok(())
        }
    }
}

/// Print the effective configuration, noting when it is all defaults.
fn show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "No config file at {} - showing built-in defaults.",
            path.display()
        );
    }
    let config = Config::load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default config file at `path`, refusing to clobber an existing
/// one unless `force` is set.
fn write_initial_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, Config::default().to_toml()?)?;
    Ok(())
}
