//! Rented vehicle descriptions.

use serde::{Deserialize, Serialize};

/// A rented asset, described by its type, brand and license plate.
///
/// Vehicles carry no identity beyond their fields and are never mutated
/// after construction. Presence of each field is enforced by the caller
/// (see [`crate::input::RentalForm`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "type")]
    kind: String,
    brand: String,
    plate: String,
}

impl Vehicle {
    /// Create a new vehicle description.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        brand: impl Into<String>,
        plate: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            brand: brand.into(),
            plate: plate.into(),
        }
    }

    /// The vehicle type (e.g. `car`, `motorbike`).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The vehicle brand.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// The license plate.
    #[must_use]
    pub fn plate(&self) -> &str {
        &self.plate
    }

    /// Human-readable one-line summary, e.g. `car • Toyota (AB123)`.
    ///
    /// This is the string snapshotted into rental history events.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} • {} ({})", self.kind, self.brand, self.plate)
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
