use clap::builder::FalseyValueParser;
use clap::Parser;
use ossprey_scan::prelude::ScanMode;
use std::path::PathBuf;

/// Build a dependency inventory and check it with the Ossprey scanning service
#[derive(Parser, Debug)]
#[command(name = "ossprey-scan")]
#[command(version)]
#[command(
    about = "Find the Python and JavaScript dependencies of a project and scan them for malware",
    long_about = None
)]
pub struct Args {
    /// Scanning service URL [default: https://api.ossprey.com]
    #[arg(long, env = "INPUT_URL")]
    pub url: Option<String>,

    /// Directory to scan (defaults to current directory)
    #[arg(short, long, env = "INPUT_PACKAGE")]
    pub package: Option<PathBuf>,

    /// Which artifacts to scan: auto, python, npm or yarn
    #[arg(short, long, env = "INPUT_MODE")]
    pub mode: Option<ScanMode>,

    /// API key for the scanning service
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Build and print the inventory without contacting the service
    #[arg(long, env = "INPUT_DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Like --dry-run, but inject a synthetic finding to exercise the failure path
    #[arg(long, env = "INPUT_DRY_RUN_MALICIOUS", value_parser = FalseyValueParser::new())]
    pub dry_run_malicious: bool,

    /// Exit successfully even when the scan itself fails
    #[arg(long, env = "INPUT_SOFT_ERROR", value_parser = FalseyValueParser::new())]
    pub soft_error: bool,

    /// Enable debug logging
    #[arg(short, long, env = "INPUT_VERBOSE", value_parser = FalseyValueParser::new())]
    pub verbose: bool,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip paths starting with this prefix (relative to the scanned directory).
    /// Can be specified multiple times: -e build -e .venv
    #[arg(short, long = "exclude", value_name = "PATH")]
    pub exclude: Vec<PathBuf>,

    /// Config file path (defaults to ossprey.config.yml in the scanned directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parses command-line arguments and environment variables
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
