use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use geocode_batch::api::GoogleGeocoder;
use geocode_batch::batch::{Batch, run_files};
use geocode_batch::config::{Config, FileConfig, Overrides};

/// Geocode a file of addresses, one per line, into "address",lat,lng lines
///
/// Examples:
///   # Geocode addresses.txt into coords.csv
///   geocode-batch -i addresses.txt -o coords.csv
///
///   # English results, printing every query
///   geocode-batch -i addresses.txt -o coords.csv --language en -v
///
///   # Use the keyed endpoint from a config file
///   geocode-batch -i addresses.txt -o coords.csv --config geocode-batch.toml
#[derive(Parser, Debug)]
#[command(name = "geocode-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Address file, one address per line
    #[arg(short = 'i', long, value_name = "FILE")]
    input: PathBuf,

    /// Output file (created or truncated)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Make the operation more talkative
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Path to config file (optional, auto-searches geocode-batch.toml if not provided)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Geocoding endpoint URL
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Language for returned results (e.g. zh-CN, en)
    #[arg(long)]
    language: Option<String>,

    /// API key sent as the `key` query parameter
    #[arg(long)]
    api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The level is only known once the config file is read; until then
    // `--verbose` decides. An explicit RUST_LOG always wins.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    if !rust_log_set && !args.verbose {
        log::set_max_level(log::LevelFilter::Warn);
    }

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::from_path(path)?),
        None => FileConfig::load(),
    };

    let overrides = Overrides {
        verbose: args.verbose,
        endpoint: args.endpoint,
        language: args.language,
        api_key: args.api_key,
        timeout_secs: args.timeout,
    };
    let config = Config::resolve(args.input, args.output, overrides, file_config)?;
    if !rust_log_set {
        log::set_max_level(config.log_level());
    }

    if config.verbose {
        println!("Configuration:");
        println!("  Input: {}", config.input.display());
        println!("  Output: {}", config.output.display());
        println!("  Endpoint: {}", config.geocoder.endpoint);
        println!("  Language: {}", config.geocoder.language);
        println!("  Timeout: {}s", config.geocoder.timeout_secs);
        println!();
    }

    let geocoder =
        GoogleGeocoder::new(&config.geocoder).context("Failed to set up geocoding client")?;

    let mut batch = Batch::new(geocoder);
    let spinner = if config.verbose {
        batch = batch.verbose(std::io::stdout());
        None
    } else {
        let spinner = create_spinner("Geocoding addresses...");
        batch = batch.with_progress(spinner.clone());
        Some(spinner)
    };

    let start = Instant::now();
    let result = run_files(&mut batch, &config.input, &config.output, &mut std::io::stderr());
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let stats = result?;

    if config.verbose {
        println!();
        println!(
            "Done! {} queried, {} located, {} without match, {} failed [{:.1}s]",
            stats.queried,
            stats.located,
            stats.empty,
            stats.failed,
            start.elapsed().as_secs_f32()
        );
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
