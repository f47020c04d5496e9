//! Linkeep CLI
//!
//! Command-line interface for linkeep - local bookmark management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use linkeep_core::{BookmarkStore, Config};

mod commands;
mod output;
mod prompt;
mod title;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkeep")]
#[command(about = "Linkeep - local bookmark management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a bookmark
    Add {
        /// URL to save
        url: String,
        /// Display name (fetched from the page title when omitted)
        #[arg(short, long)]
        name: Option<String>,
        /// Tags to add
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// List bookmarks
    #[command(alias = "ls")]
    List {
        /// Index expression, e.g. "1-3 7 9" (all records when omitted)
        indices: Option<String>,
    },
    /// Update bookmarks interactively
    Update {
        /// Index expression (all records when omitted)
        indices: Option<String>,
    },
    /// Delete bookmarks
    #[command(alias = "rm")]
    Delete {
        /// Index expression, e.g. "1-3 7 9"
        indices: String,
    },
    /// Open bookmarks in the browser
    Open {
        /// Index expression (prompts for ids when omitted)
        indices: Option<String>,
    },
    /// Check whether bookmarked links are still reachable
    Check {
        /// Index expression (all records when omitted)
        indices: Option<String>,
    },
    /// Import bookmarks from a Netscape bookmark HTML file
    Import {
        /// File to read
        file: PathBuf,
    },
    /// Export bookmarks to a Netscape bookmark HTML file
    Export {
        /// File to write
        file: PathBuf,
    },
    /// Run the web interface
    Serve {
        /// Port to listen on (defaults to the configured server_port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, server_port)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config management doesn't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
            Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, &output),
        };
    }

    let config = Config::load().context("Failed to load configuration")?;
    let mut store = BookmarkStore::open(&config).context("Failed to open bookmark store")?;

    match cli.command {
        Commands::Add { url, name, tag } => {
            commands::bookmark::add(&mut store, url, name, tag, &output).await
        }
        Commands::List { indices } => {
            commands::bookmark::list(&store, indices.as_deref(), &output)
        }
        Commands::Update { indices } => {
            commands::bookmark::update(&mut store, indices.as_deref(), &output)
        }
        Commands::Delete { indices } => {
            commands::bookmark::delete(&mut store, &indices, &output)
        }
        Commands::Open { indices } => {
            commands::bookmark::open(&store, indices.as_deref(), &output)
        }
        Commands::Check { indices } => {
            commands::check::run(&store, indices.as_deref(), &output).await
        }
        Commands::Import { file } => commands::io::import(&mut store, &file, &output),
        Commands::Export { file } => commands::io::export(&store, &file, &output),
        Commands::Serve { port } => commands::serve::run(store, &config, port, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}
