//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod intent;
pub mod run;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Seed the promotion randomness.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not start flash sales and suggestions.
    #[arg(long)]
    pub no_promotions: bool,

    /// Price the cart as if today were this date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only print stock alerts.
    #[arg(long)]
    pub alerts: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
