//! Comic-Harvest main entry point
//!
//! This is the command-line interface for the Comic-Harvest archiver.

use clap::Parser;
use comic_harvest::config::{load_config_with_hash, Config};
use comic_harvest::crawler::{build_http_client, CrawlJob, Crawler, Downloader, HttpPageSource};
use comic_harvest::output::{self, StdoutSink};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Comic-Harvest: a sequential web comic archiver
///
/// Comic-Harvest walks each configured comic archive from its start page,
/// following "next" links, and saves every comic image under a numbered,
/// titled file name.
#[derive(Parser, Debug)]
#[command(name = "comic-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A sequential web comic archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Only crawl the comic with this title (repeatable)
    #[arg(long, value_name = "TITLE")]
    only: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let jobs = build_jobs(&config, &cli.only)?;

    if cli.dry_run {
        handle_dry_run(&config, &jobs);
        return Ok(ExitCode::SUCCESS);
    }

    handle_crawl(&config, &jobs).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("comic_harvest=info,warn"),
            1 => EnvFilter::new("comic_harvest=debug,info"),
            2 => EnvFilter::new("comic_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Turns the selected config entries into crawl jobs, in file order
fn build_jobs(config: &Config, only: &[String]) -> comic_harvest::Result<Vec<CrawlJob>> {
    let root = Path::new(&config.output.root_directory);
    let jobs = config
        .select_comics(only)?
        .into_iter()
        .map(|entry| CrawlJob::from_entry(entry, root))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(jobs)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, jobs: &[CrawlJob]) {
    println!("=== Comic-Harvest Dry Run ===\n");

    println!("HTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nOutput:");
    println!("  Root directory: {}", config.output.root_directory);

    println!("\nComics ({}):", jobs.len());
    for job in jobs {
        println!("  - {} [{}]", job.title, job.site);
        println!("    * start: {}", job.start_url);
        println!("    * into:  {}", job.destination.display());
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation, one comic after another
async fn handle_crawl(
    config: &Config,
    jobs: &[CrawlJob],
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let client = build_http_client(&config.http)?;
    let source = HttpPageSource::new(client.clone());
    let downloader = Downloader::new(client);
    let sink = StdoutSink;
    let crawler = Crawler::new(&source, &downloader, &sink);

    tracing::info!("Crawling {} comics", jobs.len());

    let mut aborted = 0usize;
    for job in jobs {
        let summary = crawler.run(job).await;
        output::report(&summary, &sink);
        if summary.is_aborted() {
            aborted += 1;
        }
    }

    if aborted > 0 {
        tracing::error!("{} of {} comics exited abruptly", aborted, jobs.len());
        Ok(ExitCode::FAILURE)
    } else {
        tracing::info!("All comics completed successfully");
        Ok(ExitCode::SUCCESS)
    }
}
