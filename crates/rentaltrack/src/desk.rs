//! The rental desk: one working session over a registry and its store.
//!
//! The desk is what a front end holds on to. It loads the registry when
//! opened and saves it after every change. A failed save is logged and
//! otherwise ignored; the in-memory registry stays authoritative for the
//! rest of the session.

use tracing::{info, warn};

use crate::clock::Clock;
use crate::customer::Customer;
use crate::error::Result;
use crate::input::{self, RentalForm};
use crate::registry::Registry;
use crate::storage::BlobStore;

/// A registry bound to the blob store it persists to.
#[derive(Debug)]
pub struct RentalDesk<S: BlobStore> {
    registry: Registry,
    store: S,
    key: String,
}

impl<S: BlobStore> RentalDesk<S> {
    /// Open a desk, loading whatever is stored under `key`.
    ///
    /// Missing or unreadable data starts an empty registry.
    pub fn open(store: S, key: impl Into<String>, clock: impl Clock + 'static) -> Self {
        let key = key.into();
        let registry = Registry::load(&store, &key, clock);
        info!(
            "Loaded {} customers ({} renting) from '{}'",
            registry.len(),
            registry.currently_renting().len(),
            key
        );
        Self {
            registry,
            store,
            key,
        }
    }

    /// Read access to the registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The store backing this desk.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The blob key this desk saves under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Record a rental from a submitted form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] if any form field is blank.
    pub fn submit_rental(&mut self, form: &RentalForm) -> Result<&Customer> {
        let request = form.validate()?;
        let phone = request.phone.clone();
        self.registry.record_transaction(request)?;
        info!("Recorded rental for {}", phone);
        self.persist();
        self.customer(&phone)
    }

    /// Record a return for the customer with `phone`.
    ///
    /// Returns the customer and whether a vehicle was handed back. A return
    /// with nothing rented changes nothing and is not saved.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] for a blank phone number and
    /// [`crate::Error::NotFound`] for an unknown one.
    pub fn record_return(&mut self, phone: &str) -> Result<(&Customer, bool)> {
        let phone = input::return_phone(phone)?;
        let (_, returned) = self.registry.record_return(phone)?;
        if returned {
            info!("Recorded return for {}", phone);
            self.persist();
        }
        Ok((self.customer(phone)?, returned))
    }

    /// Register a customer ahead of any rental.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] for a blank name or phone and
    /// [`crate::Error::DuplicateKey`] if the phone is already registered.
    pub fn add_customer(&mut self, name: &str, phone: &str) -> Result<&Customer> {
        let name = name.trim();
        if name.is_empty() {
            return Err(crate::Error::invalid_input("name"));
        }
        let phone = phone.trim();
        self.registry.add_customer(Customer::new(name, phone))?;
        info!("Registered customer {}", phone);
        self.persist();
        self.customer(phone)
    }

    /// Save the registry, logging and discarding any failure.
    ///
    /// Returns whether the save succeeded.
    pub fn persist(&self) -> bool {
        match self.registry.save(&self.store, &self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save rental data to '{}': {}", self.key, e);
                false
            }
        }
    }

    fn customer(&self, phone: &str) -> Result<&Customer> {
        self.registry
            .find(phone)
            .ok_or_else(|| crate::Error::internal(format!("customer {phone} vanished after update")))
    }
}
