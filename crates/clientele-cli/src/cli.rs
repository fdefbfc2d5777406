//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use clientele_core::{ALL, DEFAULT_DATA_PATH};

/// Clientele - Customer-service analytics dashboard
#[derive(Parser)]
#[command(name = "clientele")]
#[command(about = "Customer-service CSV analytics dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Customer CSV path (example data is used if it cannot be loaded)
    #[arg(long, default_value = DEFAULT_DATA_PATH, global = true)]
    pub data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter flags shared by the reporting commands
#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Gender to keep ("all" for everyone)
    #[arg(short, long, default_value = ALL)]
    pub gender: String,

    /// Neighborhood to keep ("all" for everywhere)
    #[arg(short, long, default_value = ALL)]
    pub neighborhood: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the insight list
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print chart series and one page of the customer table
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Table page (0-based)
        #[arg(long, default_value = "0")]
        page: usize,

        /// Rows per page: 5, 10 or 20
        #[arg(long, default_value = "10")]
        page_size: usize,

        /// Print the full dashboard view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the values offered by the filter dropdowns
    Options,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8050")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable the login gate (local development only)
        #[arg(long)]
        no_auth: bool,
    },
}
