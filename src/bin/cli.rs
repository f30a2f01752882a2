//! jvnlist CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jvnlist::{
    error::Result,
    models::Config,
    pipeline::{self, HttpFetcher},
    storage::{LocalStorage, RecordStorage},
};

/// jvnlist - incremental JVN advisory harvester
#[derive(Parser, Debug)]
#[command(name = "jvnlist", version, about = "Incremental JVN advisory harvester")]
struct Cli {
    /// Directory holding config.toml and the record files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch details for advisories not stored yet
    Crawl {
        /// Fetch every new advisory published in this year (no fetch limit)
        #[arg(short, long)]
        year: Option<i32>,

        /// Maximum number of new details to fetch
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch the advisory index and report how many entries it lists
    List,

    /// Validate configuration file
    Validate,

    /// Show stored record counts
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.data_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path);
    log::debug!("Configuration: {:?}", config);
    if cli.quiet {
        config.logging.show_progress = false;
    }

    let storage = LocalStorage::with_paths(&cli.data_dir, config.paths.clone());

    match cli.command {
        Command::Crawl { year, limit } => {
            if year.is_some() {
                config.reconcile.year_filter = year;
            }
            if let Some(limit) = limit {
                config.reconcile.fetch_limit = limit;
            }
            config.validate()?;

            let fetcher = HttpFetcher::new(&config.crawler)?;
            let outcome = pipeline::run_crawler(&config, &storage, &fetcher).await?;

            log::info!(
                "Crawl complete: {} new advisories stored in {}",
                outcome.appended,
                storage.root_dir().display()
            );
        }

        Command::List => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let headlines = pipeline::fetch_headlines(&config, &fetcher).await?;
            log::info!("Index lists {} advisories", headlines.len());
            if let Some(latest) = headlines.first() {
                log::info!("Latest: {} {}", latest.published_at, latest.title);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!("    endpoint: {}", config.index_url()?);
            log::info!("    fetch limit: {}", config.reconcile.fetch_limit);
            log::info!("    request delay: {}ms", config.crawler.request_delay_ms);
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());

            let headlines = storage.load_headlines().await?;
            let details = storage.load_details().await?;
            log::info!("Index snapshot: {} headlines", headlines.len());
            log::info!("Stored details: {}", details.len());

            if let Some(newest) = details.iter().filter_map(|d| d.published_at).max() {
                log::info!("Newest stored advisory published {}", newest);
            }
        }
    }

    Ok(())
}
