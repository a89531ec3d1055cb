//! Cloud Carbon Footprint CLI
//!
//! A command-line tool for computing carbon footprint reports, green
//! scores, and what-if simulations from cloud billing exports and
//! Terraform definitions.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{configure, report, score, simulate, terraform};
use output::OutputFormat;

/// Cloud Carbon Footprint CLI
#[derive(Parser)]
#[command(name = "ccf")]
#[command(author, version, about = "CLI for the Cloud Carbon Footprint engine", long_about = None)]
pub struct Cli {
    /// Output format (defaults to the configured value, then table)
    #[arg(long, short)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a footprint report from a billing export (.csv or .json)
    Report {
        /// Billing export file
        file: PathBuf,
    },

    /// Estimate footprint from a Terraform file
    Terraform {
        /// Terraform source file
        file: PathBuf,
    },

    /// Compute the green score for a billing export
    Score {
        /// Billing export file
        file: PathBuf,

        /// Print only the embeddable badge markdown
        #[arg(long)]
        badge: bool,
    },

    /// Show the highest-carbon resources
    Top {
        /// Billing export file
        file: PathBuf,

        /// Number of resources to show
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Run a what-if simulation
    Simulate {
        /// Billing export file
        file: PathBuf,

        /// Seed overrides with preconfigured cleaner-region quick wins
        #[arg(long)]
        quick_wins: bool,

        /// Model more efficient compute (reduces EC2 usage by 20%)
        #[arg(long)]
        efficient_compute: bool,

        /// Per-resource region override, repeatable
        #[arg(long = "override", value_name = "ID=REGION")]
        overrides: Vec<String>,
    },

    /// Show or update CLI defaults
    Config {
        /// Default output format to persist
        #[arg(long)]
        format: Option<String>,

        /// Default top-emitter count to persist
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::Config::load().unwrap_or_default();
    let format = cli.format.unwrap_or_else(|| {
        cfg.default_format
            .as_deref()
            .map(OutputFormat::from_config)
            .unwrap_or_default()
    });

    match cli.command {
        Commands::Report { file } => {
            report::show_report(&file, format)?;
        }
        Commands::Terraform { file } => {
            terraform::show_terraform(&file, format)?;
        }
        Commands::Score { file, badge } => {
            score::show_score(&file, badge, format)?;
        }
        Commands::Top { file, count } => {
            let count = count
                .or(cfg.default_top_count)
                .unwrap_or(carbon_lib::advisor::DEFAULT_TOP_N);
            report::show_top(&file, count, format)?;
        }
        Commands::Simulate {
            file,
            quick_wins,
            efficient_compute,
            overrides,
        } => {
            simulate::run_simulation(&file, quick_wins, efficient_compute, &overrides, format)?;
        }
        Commands::Config { format, top } => {
            configure::show_or_update(format, top)?;
        }
    }

    Ok(())
}
