//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwatch - Budget dashboard for your transaction feed
#[derive(Parser)]
#[command(name = "spendwatch")]
#[command(about = "Track spending against per-category budgets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a budget report for a transaction feed CSV
    Report {
        /// Feed CSV to import (Date, Activity Description, Category, Amount)
        #[arg(short, long)]
        file: PathBuf,

        /// Category limits, e.g. grocery=400,dining=150
        #[arg(short, long)]
        limits: Option<String>,

        /// Start of the reporting period (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End of the reporting period (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Emit the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Distribute a total budget across categories by percentage
    Plan {
        /// Total budget to distribute
        #[arg(short, long)]
        total: f64,

        /// Percentage allocations, e.g. grocery=30,dining=15
        #[arg(short, long)]
        allocate: String,
    },

    /// Generate spending insights for a transaction feed CSV
    ///
    /// Uses the configured advisory backend (OPENAI_API_KEY or
    /// ADVISOR_BACKEND=mock); without one, deterministic fallback
    /// insights are shown.
    Insights {
        /// Feed CSV to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Category limits, e.g. grocery=400,dining=150
        #[arg(short, long)]
        limits: Option<String>,

        /// Advisory call timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Emit the insight bundle as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Fetch transactions from the sandbox banking API
    ///
    /// Requires SANDBOX_API_KEY and SANDBOX_CUSTOMER_ID; set
    /// SANDBOX_API_HOST to override the default host.
    Fetch {
        /// Category limits, e.g. grocery=400,dining=150
        #[arg(short, long)]
        limits: Option<String>,
    },
}
