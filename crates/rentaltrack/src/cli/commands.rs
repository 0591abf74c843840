//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::input::RentalForm;

/// Rent command arguments.
#[derive(Debug, Args)]
pub struct RentCommand {
    /// Customer name (used when the phone number is new)
    #[arg(short, long)]
    pub name: String,

    /// Customer phone number
    #[arg(short, long)]
    pub phone: String,

    /// Vehicle type (e.g. car, motorbike)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub vehicle_type: String,

    /// Vehicle brand
    #[arg(short = 'b', long = "brand", value_name = "BRAND")]
    pub vehicle_brand: String,

    /// License plate
    #[arg(long)]
    pub plate: String,
}

impl From<RentCommand> for RentalForm {
    fn from(cmd: RentCommand) -> Self {
        Self {
            name: cmd.name,
            phone: cmd.phone,
            vehicle_type: cmd.vehicle_type,
            vehicle_brand: cmd.vehicle_brand,
            plate: cmd.plate,
        }
    }
}

/// Return command arguments.
#[derive(Debug, Args)]
pub struct ReturnCommand {
    /// Phone number of the returning customer
    pub phone: String,
}

/// Add-customer command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Customer name
    #[arg(short, long)]
    pub name: String,

    /// Customer phone number
    #[arg(short, long)]
    pub phone: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// History command arguments.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Phone number of the customer
    pub phone: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
    /// HTML fragment
    Html,
}
