//! Customers and their rent/return behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::{Event, EventKind};
use crate::vehicle::Vehicle;

/// A registered customer.
///
/// A customer is either idle or renting exactly one vehicle. The phone
/// number is the customer's identity inside a [`crate::Registry`] and never
/// changes once set; the history only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    name: String,
    phone: String,
    #[serde(default)]
    current_vehicle: Option<Vehicle>,
    #[serde(default)]
    history: Vec<Event>,
}

impl Customer {
    /// Create an idle customer with an empty history.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            current_vehicle: None,
            history: Vec::new(),
        }
    }

    /// The customer's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The customer's phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The vehicle currently rented, if any.
    #[must_use]
    pub fn current_vehicle(&self) -> Option<&Vehicle> {
        self.current_vehicle.as_ref()
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Event] {
        &self.history
    }

    /// Whether the customer currently holds a vehicle.
    #[must_use]
    pub fn is_renting(&self) -> bool {
        self.current_vehicle.is_some()
    }

    /// Hand `vehicle` to the customer and log a RENT event at `at`.
    ///
    /// Renting while already renting replaces the held vehicle. No RETURN
    /// event is written for the replaced one.
    pub fn rent(&mut self, vehicle: Vehicle, at: DateTime<Utc>) {
        self.history
            .push(Event::new(EventKind::Rent, at, vehicle.summary()));
        self.current_vehicle = Some(vehicle);
    }

    /// Take back the held vehicle and log a RETURN event at `at`.
    ///
    /// Does nothing for an idle customer. Returns whether a vehicle was
    /// actually returned.
    pub fn return_vehicle(&mut self, at: DateTime<Utc>) -> bool {
        let Some(vehicle) = self.current_vehicle.take() else {
            return false;
        };
        self.history
            .push(Event::new(EventKind::Return, at, vehicle.summary()));
        true
    }
}
