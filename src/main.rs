//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Build the post index and site data of a blog/portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index posts and write the site data JSON
    #[command(alias = "b")]
    Build {
        /// Posts per listing page (defaults to `page_size` from the config)
        #[arg(short, long)]
        page_size: Option<usize>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List site information
    List {
        /// Type of content to list (post, page, tag, category, archive)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Escape the contents of <code> sections in an HTML file
    EscapeCode {
        /// HTML file to read
        input: PathBuf,

        /// File to write the escaped HTML to
        output: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Build { page_size, output } => {
            let site = folio::Site::new(&base_dir)?;
            tracing::info!("Building site data for {:?}", base_dir);
            folio::commands::build::run(&site, page_size, output.as_deref())?;
        }

        Commands::List { r#type } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::EscapeCode { input, output } => {
            let input = base_dir.join(input);
            let output = base_dir.join(output);
            folio::commands::escape::run(&input, &output)?;
            println!("Processed HTML has been saved to: {}", output.display());
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
