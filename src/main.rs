//! Onpage-SEO main entry point
//!
//! This is the command-line interface for the single-page SEO analyzer.

use clap::Parser;
use onpage_seo::config::{load_config_with_hash, Config};
use onpage_seo::{analyze_page, ErrorResponse, Report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Onpage-SEO: on-page SEO analysis for a single URL
///
/// Onpage-SEO fetches one page, extracts its title, meta description,
/// headings, body text, links and images, and prints a scored JSON report.
#[derive(Parser, Debug)]
#[command(name = "onpage-seo")]
#[command(version = "1.0.0")]
#[command(about = "On-page SEO analysis for a single URL", long_about = None)]
struct Cli {
    /// Absolute http(s) URL of the page to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Focus keyword to evaluate
    #[arg(short, long)]
    keyword: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match analyze_page(&config, &cli.url, cli.keyword.as_deref()).await {
        Ok(report) => {
            print_report(&report, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            print_error(&e.to_response(), cli.pretty)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON document.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("onpage_seo=info,warn"),
            1 => EnvFilter::new("onpage_seo=debug,info"),
            2 => EnvFilter::new("onpage_seo=trace,debug"),
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

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Prints the report to stdout
fn print_report(report: &Report, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", to_json(report, pretty)?);
    Ok(())
}

/// Prints the error envelope to stdout
fn print_error(response: &ErrorResponse, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", to_json(response, pretty)?);
    Ok(())
}
