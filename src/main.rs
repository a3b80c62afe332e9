//! Folio - A static site generator for markdown blogs.

use anyhow::{Result, bail};
use clap::Parser;
use folio::build::build_site;
use folio::cli::{Cli, Commands};
use folio::config::{self, SiteConfig};
use folio::init::new_site;
use folio::serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    config::init_config(load_config(cli)?);
    let config = config::cfg();

    match &cli.command {
        Commands::Init { .. } => new_site(&config, cli.has_init_name()),
        Commands::Build { .. } => build_site(&config),
        Commands::Serve { .. } => {
            build_site(&config)?;
            serve_site(&config)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
