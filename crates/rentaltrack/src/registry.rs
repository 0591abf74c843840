//! The customer registry.
//!
//! The [`Registry`] owns every [`Customer`] in insertion order and is the
//! only writer of persisted rental state. Customers are keyed by phone
//! number, which is unique across the registry.
//!
//! Persistence is explicit: [`Registry::save`] and [`Registry::load`] work
//! against any [`BlobStore`], and it is up to the caller to decide what a
//! failed save means (see [`crate::RentalDesk`]).

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::customer::Customer;
use crate::error::{Error, Result};
use crate::storage::BlobStore;
use crate::vehicle::Vehicle;

/// A request to record a rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Customer name, used only if the phone number is new.
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// The vehicle being rented.
    pub vehicle: Option<Vehicle>,
}

impl TransactionRequest {
    /// Build a request for renting `vehicle`.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>, vehicle: Vehicle) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            vehicle: Some(vehicle),
        }
    }
}

/// In-memory list of customers, keyed by phone number.
#[derive(Debug)]
pub struct Registry {
    customers: Vec<Customer>,
    clock: Box<dyn Clock>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl Registry {
    /// Create an empty registry that timestamps events with `clock`.
    #[must_use]
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            customers: Vec::new(),
            clock: Box::new(clock),
        }
    }

    /// All customers in insertion order.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of registered customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether no customers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Look up a customer by phone number.
    #[must_use]
    pub fn find(&self, phone: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.phone() == phone)
    }

    fn position(&self, phone: &str) -> Option<usize> {
        self.customers.iter().position(|c| c.phone() == phone)
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the phone number is blank and
    /// [`Error::DuplicateKey`] if it is already registered.
    pub fn add_customer(&mut self, customer: Customer) -> Result<()> {
        if customer.phone().trim().is_empty() {
            return Err(Error::invalid_input("phone"));
        }
        if self.position(customer.phone()).is_some() {
            return Err(Error::duplicate_key(customer.phone()));
        }
        debug!("Registering customer {}", customer.phone());
        self.customers.push(customer);
        Ok(())
    }

    /// Record a rental, registering the customer first if the phone is new.
    ///
    /// Returns the affected customer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the vehicle is missing or the phone
    /// number is blank. Nothing is recorded in that case.
    pub fn record_transaction(&mut self, request: TransactionRequest) -> Result<&Customer> {
        let TransactionRequest {
            name,
            phone,
            vehicle,
        } = request;
        let vehicle = vehicle.ok_or_else(|| Error::invalid_input("vehicle"))?;
        if phone.trim().is_empty() {
            return Err(Error::invalid_input("phone"));
        }

        let index = if let Some(index) = self.position(&phone) {
            index
        } else {
            debug!("Registering customer {} on first rental", phone);
            self.customers.push(Customer::new(name, phone));
            self.customers.len() - 1
        };

        let now = self.clock.now();
        let customer = &mut self.customers[index];
        customer.rent(vehicle, now);
        Ok(&*customer)
    }

    /// Record that the customer with `phone` returned their vehicle.
    ///
    /// Returns the customer and whether a vehicle was actually handed back.
    /// Returning when nothing is rented is accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no customer has this phone number.
    pub fn record_return(&mut self, phone: &str) -> Result<(&Customer, bool)> {
        let index = self.position(phone).ok_or_else(|| Error::not_found(phone))?;
        let now = self.clock.now();
        let customer = &mut self.customers[index];
        let returned = customer.return_vehicle(now);
        if !returned {
            debug!("Customer {} had nothing to return", phone);
        }
        Ok((&*customer, returned))
    }

    /// Customers currently holding a vehicle, in registry order.
    #[must_use]
    pub fn currently_renting(&self) -> Vec<&Customer> {
        self.customers.iter().filter(|c| c.is_renting()).collect()
    }

    /// Serialize every customer, with current vehicle and history, to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.customers)?)
    }

    /// Strictly parse a persisted blob into a customer list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON and [`Error::CorruptData`]
    /// if two records share a phone number.
    pub fn try_deserialize(blob: &str) -> Result<Vec<Customer>> {
        let customers: Vec<Customer> = serde_json::from_str(blob)?;
        ensure_unique_phones(&customers)?;
        Ok(customers)
    }

    /// Rebuild a registry from a persisted blob.
    ///
    /// An absent or unreadable blob yields an empty registry.
    #[must_use]
    pub fn deserialize(blob: Option<&str>, clock: impl Clock + 'static) -> Self {
        let customers = match blob.map(Self::try_deserialize) {
            None => Vec::new(),
            Some(Ok(customers)) => customers,
            Some(Err(e)) => {
                warn!("Discarding unreadable rental data: {}", e);
                Vec::new()
            }
        };
        Self {
            customers,
            clock: Box::new(clock),
        }
    }

    /// Write the registry to `store` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &dyn BlobStore, key: &str) -> Result<()> {
        let blob = self.serialize()?;
        store.put(key, &blob)
    }

    /// Load the registry stored under `key`.
    ///
    /// A failed read is treated like missing data: the result is empty.
    #[must_use]
    pub fn load(store: &dyn BlobStore, key: &str, clock: impl Clock + 'static) -> Self {
        match store.get(key) {
            Ok(blob) => Self::deserialize(blob.as_deref(), clock),
            Err(e) => {
                warn!("Failed to read rental data '{}': {}", key, e);
                Self::new(clock)
            }
        }
    }
}

fn ensure_unique_phones(customers: &[Customer]) -> Result<()> {
    let mut seen = HashSet::with_capacity(customers.len());
    for customer in customers {
        if !seen.insert(customer.phone()) {
            return Err(Error::corrupt_data(format!(
                "phone number {} appears more than once",
                customer.phone()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::history::EventKind;
    use crate::storage::Storage;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn registry() -> (Registry, FixedClock) {
        let clock = FixedClock::new(t0());
        (Registry::new(clock.clone()), clock)
    }

    fn toyota() -> Vehicle {
        Vehicle::new("car", "Toyota", "AB123")
    }

    fn honda() -> Vehicle {
        Vehicle::new("motorbike", "Honda", "CD456")
    }

    #[test]
    fn test_new_registry_is_empty() {
        let (registry, _) = registry();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.currently_renting().is_empty());
    }

    #[test]
    fn test_add_customer() {
        let (mut registry, _) = registry();
        registry.add_customer(Customer::new("Ana", "111")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("111").unwrap().name(), "Ana");
        assert!(registry.find("222").is_none());
    }

    #[test]
    fn test_add_customer_duplicate_phone() {
        let (mut registry, _) = registry();
        registry.add_customer(Customer::new("Ana", "111")).unwrap();

        let err = registry
            .add_customer(Customer::new("Someone Else", "111"))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("111").unwrap().name(), "Ana");
    }

    #[test]
    fn test_add_customer_blank_phone() {
        let (mut registry, _) = registry();
        let err = registry.add_customer(Customer::new("Ana", "  ")).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_first_rental_creates_customer() {
        let (mut registry, _) = registry();
        let customer = registry
            .record_transaction(TransactionRequest::new("Ana", "111", toyota()))
            .unwrap();

        assert_eq!(customer.name(), "Ana");
        assert!(customer.is_renting());
        assert_eq!(customer.history().len(), 1);
        assert_eq!(customer.history()[0].kind, EventKind::Rent);
        assert_eq!(customer.history()[0].recorded_at(), Some(t0()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_return_after_rental() {
        let (mut registry, clock) = registry();
        registry
            .record_transaction(TransactionRequest::new("Ana", "111", toyota()))
            .unwrap();
        clock.advance(Duration::hours(3));

        let (customer, returned) = registry.record_return("111").unwrap();
        assert!(returned);
        assert!(customer.current_vehicle().is_none());
        let kinds: Vec<_> = customer.history().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Rent, EventKind::Return]);
        assert_eq!(
            customer.history()[1].recorded_at(),
            Some(t0() + Duration::hours(3))
        );
        assert_eq!(customer.history()[1].vehicle_summary, toyota().summary());
    }

    #[test]
    fn test_return_unknown_phone() {
        let (mut registry, _) = registry();
        let err = registry.record_return("999").unwrap_err();
        assert!(err.is_not_found());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_return_when_idle_is_noop() {
        let (mut registry, _) = registry();
        registry.add_customer(Customer::new("Ana", "111")).unwrap();

        let (customer, returned) = registry.record_return("111").unwrap();
        assert!(!returned);
        assert!(customer.history().is_empty());
        assert!(!customer.is_renting());
    }

    #[test]
    fn test_second_rental_same_phone() {
        let (mut registry, clock) = registry();
        registry
            .record_transaction(TransactionRequest::new("Ana", "111", toyota()))
            .unwrap();
        clock.advance(Duration::minutes(10));
        registry
            .record_transaction(TransactionRequest::new("Ana B.", "111", honda()))
            .unwrap();

        assert_eq!(registry.len(), 1);
        let customer = registry.find("111").unwrap();
        assert_eq!(customer.name(), "Ana");
        assert_eq!(customer.current_vehicle(), Some(&honda()));
        let kinds: Vec<_> = customer.history().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Rent, EventKind::Rent]);
    }

    #[test]
    fn test_missing_vehicle_creates_nothing() {
        let (mut registry, _) = registry();
        let request = TransactionRequest {
            name: "Ana".to_string(),
            phone: "111".to_string(),
            vehicle: None,
        };

        let err = registry.record_transaction(request).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_blank_phone_rejected() {
        let (mut registry, _) = registry();
        let err = registry
            .record_transaction(TransactionRequest::new("Ana", "", toyota()))
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_currently_renting_filters_idle() {
        let (mut registry, _) = registry();
        registry.add_customer(Customer::new("Idle", "100")).unwrap();
        registry
            .record_transaction(TransactionRequest::new("Busy", "200", toyota()))
            .unwrap();

        let renting = registry.currently_renting();
        assert_eq!(renting.len(), 1);
        assert_eq!(renting[0].phone(), "200");
    }

    #[test]
    fn test_currently_renting_keeps_registry_order() {
        let (mut registry, _) = registry();
        for phone in ["3", "1", "2"] {
            registry
                .record_transaction(TransactionRequest::new("C", phone, toyota()))
                .unwrap();
        }
        registry.record_return("1").unwrap();

        let phones: Vec<_> = registry
            .currently_renting()
            .iter()
            .map(|c| c.phone())
            .collect();
        assert_eq!(phones, vec!["3", "2"]);
    }

    #[test]
    fn test_phones_stay_unique() {
        let (mut registry, _) = registry();
        registry.add_customer(Customer::new("A", "1")).unwrap();
        registry
            .record_transaction(TransactionRequest::new("B", "1", toyota()))
            .unwrap();
        registry
            .record_transaction(TransactionRequest::new("C", "2", honda()))
            .unwrap();
        let _ = registry.add_customer(Customer::new("D", "2"));
        registry
            .record_transaction(TransactionRequest::new("E", "2", toyota()))
            .unwrap();

        let phones: HashSet<_> = registry.customers().iter().map(Customer::phone).collect();
        assert_eq!(phones.len(), registry.len());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_serialize_round_trip() {
        let (mut registry, clock) = registry();
        registry.add_customer(Customer::new("Idle", "100")).unwrap();
        registry
            .record_transaction(TransactionRequest::new("Ana", "111", toyota()))
            .unwrap();
        clock.advance(Duration::milliseconds(1500));
        registry.record_return("111").unwrap();
        registry
            .record_transaction(TransactionRequest::new("Budi", "222", honda()))
            .unwrap();

        let blob = registry.serialize().unwrap();
        let restored = Registry::deserialize(Some(blob.as_str()), clock);

        assert_eq!(restored.customers(), registry.customers());
    }

    #[test]
    fn test_serialized_layout() {
        let (mut registry, _) = registry();
        registry
            .record_transaction(TransactionRequest::new("Ana", "111", toyota()))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&registry.serialize().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "name": "Ana",
                "phone": "111",
                "currentVehicle": {"type": "car", "brand": "Toyota", "plate": "AB123"},
                "history": [{
                    "kind": "RENT",
                    "timestamp": "2024-05-01T09:00:00.000Z",
                    "vehicleSummary": "car • Toyota (AB123)"
                }]
            }])
        );
    }

    #[test]
    fn test_deserialize_absent_blob() {
        let registry = Registry::deserialize(None, SystemClock);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deserialize_malformed_blob_resets() {
        for blob in ["not json", "{}", r#"[{"name":"Ana"}]"#, ""] {
            let registry = Registry::deserialize(Some(blob), SystemClock);
            assert!(registry.is_empty(), "expected reset for {blob:?}");
        }
    }

    #[test]
    fn test_deserialize_duplicate_phones_resets() {
        let blob = r#"[{"name":"A","phone":"1"},{"name":"B","phone":"1"}]"#;
        let err = Registry::try_deserialize(blob).unwrap_err();
        assert!(matches!(err, Error::CorruptData { .. }));
        assert!(Registry::deserialize(Some(blob), SystemClock).is_empty());
    }

    #[test]
    fn test_deserialize_keeps_foreign_timestamps() {
        let blob = r#"[{"name":"Ana","phone":"111","currentVehicle":null,"history":[{"kind":"RENT","timestamp":"2024-05-01T09:30:00","vehicleSummary":"car • Toyota (AB123)"}]}]"#;
        let registry = Registry::deserialize(Some(blob), SystemClock);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.serialize().unwrap(), blob);
    }

    #[test]
    fn test_deserialize_missing_history() {
        let blob = r#"[{"name":"Ana","phone":"111","currentVehicle":{"type":"car","brand":"Toyota","plate":"AB123"}}]"#;
        let registry = Registry::deserialize(Some(blob), SystemClock);

        let customer = registry.find("111").unwrap();
        assert!(customer.is_renting());
        assert!(customer.history().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let storage = Storage::open_in_memory().unwrap();
        let (mut registry, clock) = registry();
        registry
            .record_transaction(TransactionRequest::new("Ana", "111", toyota()))
            .unwrap();

        registry.save(&storage, "tms_data").unwrap();
        let loaded = Registry::load(&storage, "tms_data", clock);
        assert_eq!(loaded.customers(), registry.customers());
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let storage = Storage::open_in_memory().unwrap();
        let loaded = Registry::load(&storage, "tms_data", SystemClock);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_unreadable_store_is_empty() {
        #[derive(Debug)]
        struct Broken;

        impl BlobStore for Broken {
            fn get(&self, _key: &str) -> Result<Option<String>> {
                Err(Error::internal("disk on fire"))
            }

            fn put(&self, _key: &str, _value: &str) -> Result<()> {
                Err(Error::internal("disk on fire"))
            }
        }

        let loaded = Registry::load(&Broken, "tms_data", SystemClock);
        assert!(loaded.is_empty());
        assert!(loaded.save(&Broken, "tms_data").is_err());
    }
}
