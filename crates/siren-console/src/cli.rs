//! CLI argument definitions.

use clap::Parser;

/// Interactive console for the emergency-call dispatch API.
#[derive(Parser, Debug)]
#[command(name = "siren")]
#[command(author, version = env!("SIREN_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Base URL of the dispatch API
    #[arg(long, default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}
