//! # docshelf CLI (`shelf`)
//!
//! ```bash
//! shelf --config ./config/shelf.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shelf init` | Create the SQLite database and schema |
//! | `shelf import <path>` | Import a `.txt`/`.md` file or a directory |
//! | `shelf update <id> <path>` | Replace a document's text |
//! | `shelf export <id> <path>` | Write a document's text to a file |
//! | `shelf list` | List stored documents |
//! | `shelf get <id>` | Show a document and its pages |
//! | `shelf delete <id>` | Remove a document |
//! | `shelf status <id> <path>` | Compare a file with the stored document |
//! | `shelf search <keyword>` | Keyword search over all documents |
//! | `shelf score <text>` | TF-IDF score against the stored corpus |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docshelf::{config, get, ingest, inspect, migrate, search};

/// docshelf: paginated document storage with keyword search and TF-IDF
/// scoring.
#[derive(Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/shelf.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Safe to run repeatedly.
    Init,

    /// Import a text file, or every allowed file under a directory.
    Import {
        path: PathBuf,
        /// Document name (defaults to the file name).
        #[arg(long)]
        name: Option<String>,
    },

    /// Replace a document's text with the contents of a file.
    Update { id: String, path: PathBuf },

    /// Write a document's text to a file.
    Export { id: String, path: PathBuf },

    /// List stored documents.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show a document's metadata and pages.
    Get {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Delete a document and its pages.
    Delete { id: String },

    /// Report whether a file differs from the stored document.
    Status { id: String, path: PathBuf },

    /// Search all documents for a keyword (at least 3 characters).
    Search { keyword: String },

    /// Score text against a corpus of all stored documents.
    Score {
        text: String,
        /// Print per-term TF and IDF.
        #[arg(long)]
        explain: bool,
    },

    /// Print the content hash of a file.
    Hash { path: PathBuf },

    /// Show how a file would be paginated.
    Paginate {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Count words in a file and check the auto-save threshold.
    Wordcount { path: PathBuf },

    /// Transliterate Arabic text to Latin (Buckwalter).
    Transliterate { text: String },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("DOCSHELF_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Commands that don't require the database
    match &cli.command {
        Commands::Hash { path } => return inspect::run_hash(path),
        Commands::Paginate { path, json } => return inspect::run_paginate(path, *json),
        Commands::Transliterate { text } => return inspect::run_transliterate(text),
        Commands::Wordcount { path } => {
            // A missing config file means defaults; a broken one is an error.
            let cfg = if cli.config.exists() {
                config::load_config(&cli.config)?
            } else {
                config::Config::minimal()
            };
            return inspect::run_wordcount(path, cfg.autosave.word_threshold);
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import { path, name } => {
            ingest::run_import(&cfg, &path, name).await?;
        }
        Commands::Update { id, path } => {
            ingest::run_update(&cfg, &id, &path).await?;
        }
        Commands::Export { id, path } => {
            ingest::run_export(&cfg, &id, &path).await?;
        }
        Commands::List { json } => {
            get::run_list(&cfg, json).await?;
        }
        Commands::Get { id, json } => {
            get::run_get(&cfg, &id, json).await?;
        }
        Commands::Delete { id } => {
            ingest::run_delete(&cfg, &id).await?;
        }
        Commands::Status { id, path } => {
            ingest::run_status(&cfg, &id, &path).await?;
        }
        Commands::Search { keyword } => {
            search::run_search(&cfg, &keyword).await?;
        }
        Commands::Score { text, explain } => {
            search::run_score(&cfg, &text, explain).await?;
        }
        Commands::Hash { .. }
        | Commands::Paginate { .. }
        | Commands::Wordcount { .. }
        | Commands::Transliterate { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
