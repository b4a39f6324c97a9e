//! Wordforge main entry point
//!
//! This is the command-line interface for the Wordforge wordlist generator.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wordforge::config::{load_config_with_hash, validate, Config, RescanMode};
use wordforge::crawler::{run_crawl, CrawlRun, RunStatus};
use wordforge::output::{print_summary, save_results, CrawlReport};
use wordforge::url::{host_label, parse_fetch_target};

/// Wordforge: crawl a site and forge wordlists from it
///
/// Wordforge crawls a website depth-first inside its own host, renders
/// script-built pages when a browser is available, and writes frequency-ranked
/// wordlists, derived password/username/path lists, contact details and
/// metadata.
#[derive(Parser, Debug)]
#[command(name = "wordforge")]
#[command(version = "1.0.0")]
#[command(about = "Site crawler and wordlist generator", long_about = None)]
struct Cli {
    /// Start URL of the site to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum crawl depth [default: 2]
    #[arg(short, long)]
    depth: Option<u32>,

    /// Worker threads for the re-scan pass [default: 10]
    #[arg(short, long)]
    threads: Option<u32>,

    /// Delay between requests in seconds [default: 1]
    #[arg(long)]
    delay: Option<f64>,

    /// Minimum word length [default: 3]
    #[arg(short = 'm', long = "min-length")]
    min_length: Option<usize>,

    /// Output file basename [default: wordforge_<host>_<timestamp>]
    #[arg(short, long, value_name = "BASENAME")]
    output: Option<String>,

    /// Optional TOML configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Disable the headless rendering fallback
    #[arg(long)]
    no_render: bool,

    /// Skip the concurrent re-scan pass
    #[arg(long)]
    no_rescan: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_settings(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli.url, &config, config_hash.as_deref())?;
        return Ok(ExitCode::SUCCESS);
    }

    handle_crawl(&cli.url, config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordforge=info,warn"),
            1 => EnvFilter::new("wordforge=debug,info"),
            2 => EnvFilter::new("wordforge=trace,debug"),
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

/// Loads the optional config file, applies command-line overrides and validates
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(threads) = cli.threads {
        config.crawler.threads = threads;
    }
    if let Some(delay) = cli.delay {
        if !delay.is_finite() || delay < 0.0 {
            bail!("--delay must be a non-negative number of seconds, got {}", delay);
        }
        config.crawler.politeness_delay = (delay * 1000.0).round() as u64;
    }
    if let Some(min_length) = cli.min_length {
        config.extraction.min_word_length = min_length;
    }
    if let Some(output) = &cli.output {
        config.output.basename = Some(output.clone());
    }
    if cli.no_render {
        config.fetcher.render = false;
    }
    if cli.no_rescan {
        config.crawler.rescan = RescanMode::Off;
    }

    validate(&config).context("Invalid settings")?;

    Ok((config, hash))
}

/// Picks the output basename: explicit setting, else `wordforge_<host>_<unix secs>`
fn resolve_basename(config: &Config, target: &str) -> String {
    if let Some(basename) = &config.output.basename {
        return basename.clone();
    }

    let host = parse_fetch_target(target)
        .map(|url| host_label(&url))
        .unwrap_or_else(|_| "site".to_string());
    format!("wordforge_{}_{}", host, chrono::Utc::now().timestamp())
}

/// Handles the --dry-run mode: validates settings and shows what would be crawled
fn handle_dry_run(target: &str, config: &Config, config_hash: Option<&str>) -> anyhow::Result<()> {
    let start = parse_fetch_target(target).context("Invalid start URL")?;

    println!("=== Wordforge Dry Run ===\n");

    println!("Target:");
    println!("  Start URL: {}", start);
    println!("  Host: {}", host_label(&start));

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Threads: {}", config.crawler.threads);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay);
    println!(
        "  Re-scan: {:?} (below {} URLs, at depth {})",
        config.crawler.rescan, config.crawler.rescan_threshold, config.crawler.rescan_depth
    );

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Request timeout: {}s", config.fetcher.request_timeout);
    println!(
        "  Rendering: {}",
        if config.fetcher.render {
            format!(
                "enabled (below {} chars, {}s timeout)",
                config.fetcher.render_threshold, config.fetcher.render_timeout
            )
        } else {
            "disabled".to_string()
        }
    );

    println!("\nExtraction:");
    println!("  Minimum word length: {}", config.extraction.min_word_length);

    println!("\nOutput:");
    println!("  Basename: {}", resolve_basename(config, target));

    if let Some(hash) = config_hash {
        println!("\nConfig fingerprint: {}", hash);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
///
/// Results are saved whether the run completed, was interrupted or failed.
async fn handle_crawl(target: &str, config: Config) -> anyhow::Result<ExitCode> {
    let basename = resolve_basename(&config, target);

    tracing::info!(
        "Max depth: {}, threads: {}, delay: {}ms",
        config.crawler.max_depth,
        config.crawler.threads,
        config.crawler.politeness_delay
    );

    let run: CrawlRun = match run_crawl(config, target).await {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let exit = match &run.status {
        RunStatus::Completed => ExitCode::SUCCESS,
        RunStatus::Interrupted => {
            println!("\nAnalysis interrupted by user, saving partial results");
            ExitCode::SUCCESS
        }
        RunStatus::Failed(reason) => {
            tracing::error!("Crawl failed: {}", reason);
            ExitCode::FAILURE
        }
    };

    let report = CrawlReport::from_run(&run);
    match save_results(&basename, &run.state, &report) {
        Ok(saved) => {
            tracing::info!(
                "Saved {} files with basename {}",
                saved.written.len(),
                basename
            );
        }
        Err(e) => {
            tracing::error!("Failed to save results: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    }

    print_summary(&report);

    Ok(exit)
}
