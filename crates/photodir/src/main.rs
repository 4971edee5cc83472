//! Photodir CLI - browse a directory tree of photos with generated previews.
//!
//! Photodir crawls a directory, keeps only the branches that contain images,
//! and generates a fixed-width preview for every image it finds.
//!
//! # Usage
//!
//! ```bash
//! # Crawl the current directory
//! photodir crawl
//!
//! # Crawl a directory with smaller previews and at most 8 decodes at once
//! photodir crawl ~/Pictures --width 240 --max-concurrency 8
//!
//! # View configuration
//! photodir config show
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Photodir - browse a directory tree of photos with generated previews.
#[derive(Parser, Debug)]
#[command(name = "photodir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "PHOTODIR_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a directory for images and generate their thumbnails
    Crawl(cli::crawl::CrawlArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(photodir_core::Config::default_path);

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match photodir_core::Config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `photodir config path`."
            );
            photodir_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("photodir v{}", photodir_core::VERSION);

    match cli.command {
        Commands::Crawl(args) => cli::crawl::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, &config_path).await,
    }
}
