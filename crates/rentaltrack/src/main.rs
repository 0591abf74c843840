//! `rentaltrack` - CLI for recording vehicle rentals
//!
//! This binary is the front end over a [`RentalDesk`]: it parses a command,
//! applies it to the registry and prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use rentaltrack::cli::{Cli, Command, ConfigCommand, HistoryCommand, OutputFormat};
use rentaltrack::render::{self, TimeDisplay};
use rentaltrack::{
    init_logging, BlobStore, Config, Customer, Error, Registry, RentalDesk, Storage, SystemClock,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    let times = config.display.times;

    match cli.command {
        Command::Rent(rent_cmd) => {
            let mut desk = open_desk(&config)?;
            let customer = desk.submit_rental(&rent_cmd.into())?;
            println!("Rental recorded: {}", describe(customer));
        }
        Command::Return(return_cmd) => {
            let mut desk = open_desk(&config)?;
            let (customer, returned) = desk.record_return(&return_cmd.phone)?;
            if returned {
                let summary = customer
                    .history()
                    .last()
                    .map_or("", |event| event.vehicle_summary.as_str());
                println!(
                    "Return recorded: {} ({}) - {}",
                    customer.name(),
                    customer.phone(),
                    summary
                );
            } else {
                println!(
                    "{} ({}) has no vehicle to return.",
                    customer.name(),
                    customer.phone()
                );
            }
        }
        Command::Add(add_cmd) => {
            let mut desk = open_desk(&config)?;
            let customer = desk.add_customer(&add_cmd.name, &add_cmd.phone)?;
            println!("Customer registered: {}", describe(customer));
        }
        Command::List(list_cmd) => {
            let desk = open_desk(&config)?;
            let renting = desk.registry().currently_renting();
            match list_cmd.format {
                OutputFormat::Plain => print!("{}", render::render_plain(&renting, times)),
                OutputFormat::Json => println!("{}", render::render_json(&renting)?),
                OutputFormat::Html => print!("{}", render::render_html(&renting, times)),
            }
        }
        Command::History(history_cmd) => {
            let desk = open_desk(&config)?;
            handle_history(desk.registry(), &history_cmd, times)?;
        }
        Command::Export => {
            let desk = open_desk(&config)?;
            let blob = desk.store().get(desk.key())?;
            println!("{}", blob.as_deref().unwrap_or("[]"));
        }
        Command::Check => {
            let storage = open_storage(&config)?;
            handle_check(&storage, &config.storage.blob_key, times)?;
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }

    Ok(())
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let database_path = config.database_path();
    Storage::open(&database_path)
        .with_context(|| format!("cannot open rental database {}", database_path.display()))
}

fn open_desk(config: &Config) -> anyhow::Result<RentalDesk<Storage>> {
    let storage = open_storage(config)?;
    Ok(RentalDesk::open(
        storage,
        config.storage.blob_key.clone(),
        SystemClock,
    ))
}

fn describe(customer: &Customer) -> String {
    match customer.current_vehicle() {
        Some(vehicle) => format!(
            "{} ({}) - {}",
            customer.name(),
            customer.phone(),
            vehicle.summary()
        ),
        None => format!("{} ({})", customer.name(), customer.phone()),
    }
}

fn handle_history(
    registry: &Registry,
    cmd: &HistoryCommand,
    times: TimeDisplay,
) -> anyhow::Result<()> {
    let phone = cmd.phone.trim();
    let customer = registry
        .find(phone)
        .ok_or_else(|| Error::not_found(phone))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(customer.history())?);
        return Ok(());
    }

    println!("{}", describe(customer));
    if customer.history().is_empty() {
        println!("  No rentals recorded.");
    }
    for event in customer.history() {
        println!(
            "  {:<6}  {}  {}",
            event.kind,
            times.format_event(event),
            event.vehicle_summary
        );
    }
    Ok(())
}

fn handle_check(store: &Storage, key: &str, times: TimeDisplay) -> anyhow::Result<()> {
    println!("Database: {}", store.path().display());
    let Some(blob) = store.get(key)? else {
        println!("No rental data stored under '{key}'.");
        return Ok(());
    };

    match Registry::try_deserialize(&blob) {
        Ok(customers) => {
            let renting = customers.iter().filter(|c| c.is_renting()).count();
            let events: usize = customers.iter().map(|c| c.history().len()).sum();
            println!(
                "Rental data OK: {} customers, {} renting, {} events.",
                customers.len(),
                renting,
                events
            );
            if let Some(updated) = store.updated_at(key)? {
                println!("Last saved: {}", times.format(&updated));
            }
            Ok(())
        }
        Err(e) => bail!("stored rental data under '{key}' is unreadable: {e}"),
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Blob key:           {}", config.storage.blob_key);
                println!();
                println!("[Display]");
                println!("  Times:              {:?}", config.display.times);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
