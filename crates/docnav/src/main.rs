//! docnav CLI - documentation site generator with a navigable table of contents.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Documentation site generator with a navigable table of contents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize documentation in current project
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build static documentation site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Print the navigation state for a URL as JSON
    Toc {
        /// URL path, optionally with an anchor
        #[arg(default_value = "/docs")]
        url: String,

        /// Viewport width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Search query to apply
        #[arg(long)]
        search: Option<String>,

        /// Print the whole tree instead of the state summary
        #[arg(long)]
        tree: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Build { output, no_minify } => {
            let config = ConfigFile::load(&cli.config)?;
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&config, output, minify).await?;
        }
        Commands::Toc {
            url,
            width,
            search,
            tree,
        } => {
            let config = ConfigFile::load(&cli.config)?;
            let request = commands::toc::TocRequest {
                url,
                width,
                search,
                tree,
            };
            commands::toc::run(&config, request)?;
        }
    }

    Ok(())
}
