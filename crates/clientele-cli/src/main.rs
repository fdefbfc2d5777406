//! Clientele CLI - Customer-service analytics dashboard
//!
//! Usage:
//!   clientele insights --gender F       Print insights for a filter
//!   clientele summary --page-size 20    Print charts and a table page
//!   clientele options                   List filter values
//!   clientele serve --port 8050         Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up USER_LOGIN / USER_PASSWORD from a local .env, if present
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    match cli.command {
        Commands::Insights { filter } => commands::cmd_insights(&cli.data, &filter),
        Commands::Summary {
            filter,
            page,
            page_size,
            json,
        } => commands::cmd_summary(&cli.data, &filter, page, page_size, json),
        Commands::Options => commands::cmd_options(&cli.data),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.data, &host, port, no_auth).await,
    }
}
