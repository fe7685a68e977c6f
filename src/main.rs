//! Single-domain crawler entry point
//!
//! This is the command-line interface for the crawler.

use clap::Parser;
use single_domain_crawler::config::{resolve_config, ConfigOverrides};
use single_domain_crawler::crawler::run_crawl;
use single_domain_crawler::output::{log_statistics, write_crawl_result};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Crawl every reachable page of one registered domain
///
/// Starting from BASE_URL, fetches same-domain pages breadth-first up to the
/// page budget, pausing between requests, then writes the page bodies and
/// discovered HTML forms as a timestamped pair of JSON files.
#[derive(Parser, Debug)]
#[command(name = "crawl")]
#[command(version)]
#[command(about = "Single-domain web crawler", long_about = None)]
struct Cli {
    /// Base URL to start crawling
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Max pages to visit [default: 50]
    #[arg(long = "max", value_name = "N")]
    max_pages: Option<usize>,

    /// Politeness delay between requests, in seconds [default: 1.0]
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Folder to save results [default: .]
    #[arg(long, value_name = "DIR")]
    out: Option<String>,

    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let overrides = ConfigOverrides {
        max_pages: cli.max_pages,
        delay_secs: cli.delay,
        output_dir: cli.out.clone(),
    };

    let config = match resolve_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let result = match run_crawl(&cli.base_url, &config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    log_statistics(&result.stats);

    let output_dir = Path::new(&config.output.directory);
    let files = write_crawl_result(&result, output_dir)?;
    tracing::info!(
        "Saved {} and {}",
        files.pages.display(),
        files.forms.display()
    );

    println!(
        "Crawled {} pages, saved to {}",
        result.pages.len(),
        output_dir.display()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("single_domain_crawler=info,crawl=info,warn"),
            1 => EnvFilter::new("single_domain_crawler=debug,crawl=debug,info"),
            2 => EnvFilter::new("single_domain_crawler=trace,crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
