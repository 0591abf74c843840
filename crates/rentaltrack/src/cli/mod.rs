//! Command-line interface for rentaltrack.
//!
//! This module provides the CLI structure for the `rentaltrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, HistoryCommand, ListCommand, OutputFormat, RentCommand,
    ReturnCommand,
};

/// rentaltrack - Keep track of who has which vehicle
///
/// Records vehicle rentals and returns per customer and keeps a full
/// rental history in a local database.
#[derive(Debug, Parser)]
#[command(name = "rentaltrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a vehicle rental
    Rent(RentCommand),

    /// Record a vehicle return
    Return(ReturnCommand),

    /// Register a customer without renting
    Add(AddCommand),

    /// List customers currently renting
    List(ListCommand),

    /// Show a customer's rental history
    History(HistoryCommand),

    /// Print the stored rental data
    Export,

    /// Check the stored rental data for problems
    Check,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
