//! Validation of user-submitted rental and return input.
//!
//! Free-text fields arrive untrimmed from the command line. Every field is
//! trimmed and must be non-empty before anything reaches the registry.

use crate::error::{Error, Result};
use crate::registry::TransactionRequest;
use crate::vehicle::Vehicle;

/// The fields of a "submit rental" action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalForm {
    /// Customer name.
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// Vehicle type, e.g. `car`.
    pub vehicle_type: String,
    /// Vehicle brand.
    pub vehicle_brand: String,
    /// License plate.
    pub plate: String,
}

impl RentalForm {
    /// Validate the form and turn it into a registry request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first blank field.
    pub fn validate(&self) -> Result<TransactionRequest> {
        let name = required("name", &self.name)?;
        let phone = required("phone", &self.phone)?;
        let vehicle_type = required("vehicle_type", &self.vehicle_type)?;
        let vehicle_brand = required("vehicle_brand", &self.vehicle_brand)?;
        let plate = required("plate", &self.plate)?;

        Ok(TransactionRequest::new(
            name,
            phone,
            Vehicle::new(vehicle_type, vehicle_brand, plate),
        ))
    }
}

/// Validate the phone number given for a return.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the phone number is blank.
pub fn return_phone(raw: &str) -> Result<&str> {
    required("phone", raw)
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::invalid_input(field))
    } else {
        Ok(trimmed)
    }
}
