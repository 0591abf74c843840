//! `rentaltrack` - Track vehicle rentals per customer
//!
//! This library records customers, the vehicle each currently has rented and
//! a chronological history of rent/return events, and persists that state as
//! a single named blob in a local `SQLite` database.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod customer;
pub mod desk;
pub mod error;
pub mod history;
pub mod input;
pub mod logging;
pub mod registry;
pub mod render;
pub mod storage;
pub mod vehicle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use customer::Customer;
pub use desk::RentalDesk;
pub use error::{Error, Result};
pub use history::{Event, EventKind};
pub use input::RentalForm;
pub use logging::init_logging;
pub use registry::{Registry, TransactionRequest};
pub use storage::{BlobStore, Storage};
pub use vehicle::Vehicle;
