//! # Address
//!
//! Postal address used for quote zoning and shipment creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A postal address.
///
/// Only `city` and `country` take part in zone classification; the rest is
/// forwarded to the courier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// Recipient or sender name.
    #[serde(default)]
    pub name: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Street and house number.
    #[serde(default)]
    pub street: String,
    /// City.
    pub city: String,
    /// State, province or district.
    #[serde(default)]
    pub state: String,
    /// Postal code.
    #[serde(default)]
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

impl Address {
    /// Creates an address from city and country.
    #[must_use]
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            ..Self::default()
        }
    }

    /// Sets the street.
    #[must_use]
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    /// Sets the state, province or district.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    /// Sets the contact name and phone.
    #[must_use]
    pub fn with_contact(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.name = name.into();
        self.phone = phone.into();
        self
    }

    /// City trimmed and lowercased for comparisons.
    #[must_use]
    pub fn normalized_city(&self) -> String {
        self.city.trim().to_lowercase()
    }

    /// Country trimmed and uppercased for comparisons.
    #[must_use]
    pub fn normalized_country(&self) -> String {
        self.country.trim().to_uppercase()
    }

    /// Returns true if both addresses are in the same country.
    #[must_use]
    pub fn same_country(&self, other: &Self) -> bool {
        self.normalized_country() == other.normalized_country()
    }

    /// Returns true if both addresses are in the same city of the same country.
    #[must_use]
    pub fn same_city(&self, other: &Self) -> bool {
        self.same_country(other) && self.normalized_city() == other.normalized_city()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.street.is_empty() {
            write!(f, "{}, {}", self.city, self.country)
        } else {
            write!(f, "{}, {}, {}", self.street, self.city, self.country)
        }
    }
}
