use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "cantoria", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/cantoria/cantoria.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Populate an empty database from the seed asset
    ///
    /// Checks the record count and, only when the database is empty,
    /// fetches the seed asset (a JSON export of the lyrics collection),
    /// locates its 'lyrics' table and bulk-inserts the rows in a single
    /// transaction. A populated database is left untouched, so running
    /// this twice never duplicates records.
    ///
    /// The asset may be an http(s) URL or a local file path. Fetched
    /// bodies are cached beside the database and reused on later runs.
    Seed {
        /// URL or path of the seed asset (overrides the configured one)
        #[arg(long)]
        asset: Option<String>,
    },
    /// Search the catalog
    ///
    /// Matches records whose title, text, notes, or category starts with
    /// the query, ignoring case. Without a query, lists every record.
    Search {
        /// The search query (prefix)
        query: Option<String>,
    },
    /// Browse the catalog interactively
    ///
    /// Opens a full-screen view with a search box that filters as you
    /// type. Enter opens the selected record, Esc goes back or quits.
    /// Seeds an empty database first, like 'seed'.
    Browse {
        /// URL or path of the seed asset (overrides the configured one)
        #[arg(long)]
        asset: Option<String>,
    },
    /// Show a single record
    Show {
        /// Record id
        id: i64,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a record to the catalog
    Add {
        /// Title of the lyric
        title: String,
        /// Category (e.g. liturgical season)
        #[arg(long, default_value = "")]
        category: String,
        /// Lyric body, or @path to read it from a file
        #[arg(long, default_value = "")]
        text: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Show database status
    Status,
    /// Show or initialize the configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.db {
        Some(db_path) => cantoria_etl::Config::load_with_db_path(db_path)?,
        None => cantoria_etl::Config::load()?,
    };

    // Ensure database directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Using database {}", config.database_path.display());

    match cli.command {
        Commands::Seed { asset } => {
            commands::run_seed(&config, asset).await?;
        }
        Commands::Search { query } => {
            commands::run_search(&config, query.as_deref().unwrap_or(""))?;
        }
        Commands::Browse { asset } => {
            tui::run_tui(&config, asset).await?;
        }
        Commands::Show { id, json } => {
            commands::show_record(&config, id, json)?;
        }
        Commands::Add {
            title,
            category,
            text,
            notes,
        } => {
            commands::run_add(&config, title, category, text, notes)?;
        }
        Commands::Status => {
            commands::show_status(&config)?;
        }
        Commands::Config { action } => {
            commands::config::run(action)?;
        }
    }

    Ok(())
}
