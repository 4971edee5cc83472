//! The `photodir config` command.
//!
//! Every subcommand works on an explicit config file path, chosen in
//! `main` from `--config`, `PHOTODIR_CONFIG` or the platform default.

use std::io::Write;
use std::path::Path;

use clap::{Args, Subcommand};
use photodir_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration and the resolved crawl root
    Show,

    /// Print the config file path and whether it exists
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command against the file at `path`.
pub async fn execute(args: ConfigArgs, path: &Path) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match args.command {
        ConfigCommand::Show => show(path, &mut stdout),
        ConfigCommand::Path => describe_path(path, &mut stdout),
        ConfigCommand::Init { force } => init(path, force, &mut stdout),
    }
}

fn show(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let config = Config::load_or_default(path)?;
    if path.exists() {
        writeln!(out, "# Loaded from {}", path.display())?;
    } else {
        writeln!(out, "# No file at {}; showing defaults", path.display())?;
    }
    writeln!(out, "# Crawl root resolves to {}", config.crawl_root().display())?;
    writeln!(out)?;
    write!(out, "{}", config.to_toml()?)?;
    Ok(())
}

fn describe_path(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let state = if path.exists() { "" } else { " (not created yet)" };
    writeln!(out, "{}{state}", path.display())?;
    Ok(())
}

fn init(path: &Path, force: bool, out: &mut impl Write) -> anyhow::Result<()> {
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

    tracing::info!(path = %path.display(), "config file written");
    writeln!(out, "Configuration initialized at: {}", path.display())?;
    Ok(())
}
