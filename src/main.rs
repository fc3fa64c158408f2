use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use quarry::config::Config;
use quarry::db::Database;
use quarry::output::terminal;
use quarry::pipeline::analysis::validate_input;
use quarry::pipeline::build_pipeline;

/// Quarry: keywords, summaries and topics for free text.
///
/// Analyzes text with a local keyword extractor and an LLM, stores the
/// results in SQLite, and lets you search them from the terminal or over HTTP.
#[derive(Parser)]
#[command(name = "quarry", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Analyze a text and store the result
    Analyze {
        /// The text to analyze (omit to use --file)
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Analyze several files, one analysis per file
    Batch {
        /// Files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Search stored analyses by topic, keyword, title or summary
    Search {
        /// Case-insensitive search term
        term: String,
    },

    /// List stored analyses
    List {
        /// Number of analyses to skip
        #[arg(long, default_value = "0")]
        skip: u32,

        /// Maximum number of analyses to show (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Show one stored analysis
    Show {
        /// Analysis id
        id: i64,
    },

    /// Start the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind (use 0.0.0.0 to listen on all interfaces)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quarry=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Quarry database...");
            let config = Config::load()?;
            let db = open_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nQuarry is ready. Next step: set OPENAI_API_KEY in your .env file");
            println!("  (see .env.example for required variables)");
            println!("\nThen run: quarry analyze \"some text\"");
        }

        Commands::Analyze { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_text(&path)?,
                (None, None) => anyhow::bail!("Nothing to analyze. Pass TEXT or --file PATH."),
            };
            validate_input(&text)?;

            let config = Config::load()?;
            let pipeline = build_pipeline(&config)?;
            let db = open_database(&config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Analyzing...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let output = pipeline.run(&text).await;
            spinner.finish_and_clear();
            let output = output?;

            let stored = db.insert_analysis(&text, &output).await?;
            terminal::display_analysis(&stored);
            terminal::display_quality(&output.quality);
        }

        Commands::Batch { files } => {
            let config = Config::load()?;
            let pipeline = build_pipeline(&config)?;
            let db = open_database(&config)?;

            println!("Analyzing {} file(s)...", files.len());

            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Analyzing [{bar:30}] {pos}/{len} ({eta})")?,
            );

            let mut stored = 0usize;
            let mut degraded = 0usize;
            let mut skipped = 0usize;

            for path in &files {
                let text = match read_text(path) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                        skipped += 1;
                        pb.inc(1);
                        continue;
                    }
                };

                match pipeline.run(&text).await {
                    Ok(output) => {
                        if output.quality.is_degraded() {
                            degraded += 1;
                        }
                        db.insert_analysis(&text, &output).await.with_context(|| {
                            format!("Failed to store analysis of {}", path.display())
                        })?;
                        stored += 1;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping file");
                        skipped += 1;
                    }
                }
                pb.inc(1);
            }
            pb.finish_and_clear();

            println!("\n{}", "Batch complete.".bold());
            println!("  Analyses stored: {stored}");
            if degraded > 0 {
                println!(
                    "  {} {degraded} used placeholder LLM output",
                    "Warning:".yellow()
                );
            }
            if skipped > 0 {
                println!("  Files skipped: {skipped}");
            }
        }

        Commands::Search { term } => {
            if term.trim().is_empty() {
                anyhow::bail!("Search term cannot be empty");
            }
            let config = Config::load()?;
            let db = open_database(&config)?;
            let results = db.search_analyses(&term).await?;
            terminal::display_search_results(&results);
        }

        Commands::List { skip, limit } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let analyses = db.list_analyses(skip, limit).await?;
            let total = db.count_analyses().await?;
            terminal::display_analysis_list(&analyses, total);
        }

        Commands::Show { id } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            match db.get_analysis(id).await? {
                Some(analysis) => terminal::display_analysis(&analysis),
                None => anyhow::bail!("No analysis with id {id}"),
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let pipeline = build_pipeline(&config)?;
            let db = open_database(&config)?;
            quarry::web::run_server(db, pipeline, port, &bind).await?;
        }
    }

    Ok(())
}

/// Open the database (creating it if needed).
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    quarry::db::initialize_sqlite(&config.db_path)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
