//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site with sample posts
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Build the site into the output directory
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,
    },

    /// Build the site and serve it locally
    Serve {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    pub const fn has_init_name(&self) -> bool {
        matches!(self.command, Commands::Init { name: Some(_) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["folio", "build", "--clean"]).unwrap();
        assert!(matches!(cli.command, Commands::Build { clean: true }));
        assert!(!cli.is_init());
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["folio", "serve", "-p", "3000"]).unwrap();
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, Some(3000)),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_init_with_name() {
        let cli = Cli::try_parse_from(["folio", "init", "my-site"]).unwrap();
        assert!(cli.is_init());
        assert!(cli.has_init_name());
    }

    #[test]
    fn test_no_args_is_an_error() {
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }
}
