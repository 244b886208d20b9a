//! siren - interactive console for the emergency-call dispatch API.
//!
//! A thin terminal front end over the `siren-core`/`siren-rest` crates:
//! sign in, browse the paginated call list, and manage records.

mod cli;
mod dashboard;
mod guard;
mod output;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use siren_core::ApiUrl;
use siren_rest::{RestClient, SessionStore};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let api = ApiUrl::new(&cli.api_url).context("Invalid API URL")?;
    let client = RestClient::new(api);
    let session = SessionStore::new(client.clone());

    shell::run(&session, &client).await
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
