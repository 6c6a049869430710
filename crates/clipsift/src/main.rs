//! clipsift CLI - find images matching a text description with a CLIP model.
//!
//! clipsift scans a directory of images, scores each one against a target
//! phrase via contrastive comparison with a distractor phrase bank, copies
//! matches above a threshold into a destination directory, and saves the full
//! score map as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Copy images of red cars into ./clipped_dir
//! clipsift run ./photos --text "a red car"
//!
//! # Custom threshold and destination
//! clipsift run ./photos --text "a red car" --threshold 0.6 --dest-dir ./matches
//!
//! # View configuration
//! clipsift config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// clipsift - find images matching a text description with a CLIP model.
#[derive(Parser, Debug)]
#[command(name = "clipsift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a directory of images against a phrase and copy matches
    Run(cli::run::RunArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match clipsift_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `clipsift config path`."
            );
            clipsift_core::Config::default()
        }
    };
    logging::init(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("clipsift v{}", clipsift_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Run(args) => cli::run::execute(args, config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
