//! GEX command-line tool
//!
//! Fetches an option chain, computes dealer gamma exposure and prints the
//! total, the strike and expiration views, and the surface.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use gex_surface::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Dealer gamma exposure by strike, expiration and surface
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Underlying ticker, e.g. SPY
    ticker: String,

    /// Read a saved CBOE chain response instead of the network
    #[arg(long)]
    input: Option<PathBuf>,

    /// Analysis config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cache directory
    #[arg(long, default_value = "./data/cache")]
    cache_dir: PathBuf,

    /// Always fetch, never read or write the cache
    #[arg(long, default_value = "false")]
    no_cache: bool,

    /// Drop the cached snapshot for this ticker before fetching
    #[arg(long, default_value = "false")]
    refresh: bool,

    /// Cache freshness window in hours
    #[arg(long, default_value = "24")]
    max_age_hours: i64,

    /// Symmetric strike band around spot, e.g. 0.15 for ±15%
    #[arg(long)]
    band: Option<f64>,

    /// Expiration horizon in days
    #[arg(long)]
    horizon_days: Option<i64>,

    /// Leave already-expired contracts out of the expiration views
    #[arg(long, default_value = "false")]
    exclude_expired: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log format: pretty, compact or json
    #[arg(long, default_value = "pretty", env = "GEX_LOG_FORMAT")]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_format) {
        eprintln!("{}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Data retrieval or processing was unsuccessful: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> GexResult<()> {
    let ticker = args.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(GexError::invalid_input("ticker must not be empty"));
    }

    let config = analysis_config(args)?;
    let snapshot = load_snapshot(args, &ticker)?;
    let report = GexAnalyzer::with_config(config).analyze_today(&snapshot)?;

    let stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Text => TextSink::new(stdout).render(&report),
        OutputFormat::Json => JsonSink::new(stdout).render(&report),
    }
}

fn analysis_config(args: &Args) -> GexResult<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(width) = args.band {
        config.strike_band = StrikeBand::symmetric(width);
    }
    if let Some(days) = args.horizon_days {
        config.horizon.days = days;
    }
    if args.exclude_expired {
        config.horizon.exclude_expired = true;
    }

    config.validate()?;
    Ok(config)
}

fn load_snapshot(args: &Args, ticker: &str) -> GexResult<FeedSnapshot> {
    if let Some(path) = &args.input {
        return JsonFileFeed::new(path).fetch(ticker);
    }

    let client = CboeClient::new(CboeConfig::default())?;
    if args.no_cache {
        return client.fetch(ticker);
    }

    let feed = CachedFeed::new(
        client,
        CacheConfig {
            cache_dir: args.cache_dir.clone(),
            max_age_hours: args.max_age_hours,
            enabled: true,
        },
    )?;

    if args.refresh {
        feed.refresh(ticker)
    } else {
        feed.fetch(ticker)
    }
}
