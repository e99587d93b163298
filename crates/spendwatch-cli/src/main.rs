//! Spendwatch CLI - Budget dashboard for your transaction feed
//!
//! Usage:
//!   spendwatch report --file feed.csv --limits grocery=400,dining=150
//!   spendwatch plan --total 2000 --allocate grocery=30,dining=15
//!   spendwatch insights --file feed.csv --limits grocery=400
//!   spendwatch fetch --limits grocery=400

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides --verbose; without either, log at info.
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

    match cli.command {
        Commands::Report {
            file,
            limits,
            from,
            to,
            json,
        } => commands::cmd_report(&file, limits.as_deref(), from.as_deref(), to.as_deref(), json),
        Commands::Plan { total, allocate } => commands::cmd_plan(total, &allocate),
        Commands::Insights {
            file,
            limits,
            timeout,
            json,
        } => commands::cmd_insights(&file, limits.as_deref(), timeout, json).await,
        Commands::Fetch { limits } => commands::cmd_fetch(limits.as_deref()).await,
    }
}
