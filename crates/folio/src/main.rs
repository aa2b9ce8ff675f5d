//! Folio CLI - personal site metadata and search data export.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Personal site metadata and search data export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Content root directory (one subdirectory per collection)
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Collection exported as search data
    #[arg(long, default_value = "blog", global = true)]
    collection: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold site.toml and a first post
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Serve the site and /search.json
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4321")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Static files directory
        #[arg(long, default_value = "public")]
        public: PathBuf,

        /// Open browser on start
        #[arg(long)]
        open: bool,
    },

    /// Write search.json to the output directory
    Build {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, &cli.content, &cli.collection, yes).await?;
        }
        Commands::Serve {
            port,
            host,
            public,
            open,
        } => {
            let options = commands::serve::ServeOptions {
                port,
                host,
                public,
                open,
            };
            commands::serve::run(&cli.config, &cli.content, &cli.collection, options).await?;
        }
        Commands::Build { output } => {
            commands::build::run(&cli.config, &cli.content, &cli.collection, output).await?;
        }
    }

    Ok(())
}
