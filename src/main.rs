//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::list::ListKind;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Chandra Lindy")]
#[command(version)]
#[command(about = "A static portfolio and blog generator", long_about = None)]
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
    /// Generate the static site
    #[command(alias = "g")]
    Build {
        /// Rebuild when content, images or config change
        #[arg(short, long)]
        watch: bool,
    },

    /// List posts, tags or featured posts
    List {
        /// Type of content to list (posts, tags, featured)
        #[arg(default_value = "posts")]
        r#type: ListKind,
    },

    /// Show a single post by slug
    Show {
        /// Post slug (file name without .md)
        slug: String,
    },

    /// Remove the generated site
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
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
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Build { watch } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Building site...");
            site.build()?;
            println!("Built successfully!");

            if watch {
                folio::commands::build::watch(&site).await?;
            }
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, r#type)?;
        }

        Commands::Show { slug } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &slug)?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
