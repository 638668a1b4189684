//! Folio - A content pipeline for markdown blogs.
//!
//! Validates post frontmatter, derives reading time and excerpts, and
//! writes an RSS feed plus a JSON page index.

mod build;
mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod metrics;
mod text;
mod utils;

use anyhow::{Result, bail};
use build::{build_site, check_site};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Check => check_site(&config).map(|_| ()),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);

    // `check` writes nothing, so feed prerequisites don't apply
    if cli.is_build() {
        config.validate()?;
    }

    Ok(config)
}
