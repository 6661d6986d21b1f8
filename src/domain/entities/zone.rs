//! # Zone Entity
//!
//! Configured delivery zone records used to classify destinations.

use crate::domain::value_objects::{Address, ZoneType};
use serde::{Deserialize, Serialize};

/// A delivery zone record.
///
/// Matches an address when its country is listed and either no cities are
/// listed or its city is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Zone type assigned on match.
    pub zone_type: ZoneType,
    /// Country codes covered.
    pub countries: Vec<String>,
    /// Cities covered; empty means every city in `countries`.
    #[serde(default)]
    pub cities: Vec<String>,
}

impl Zone {
    /// Creates a zone covering whole countries.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_type,
            countries: Vec::new(),
            cities: Vec::new(),
        }
    }

    /// Adds a covered country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.countries.push(country.into());
        self
    }

    /// Adds a covered city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.cities.push(city.into());
        self
    }

    /// Returns true if this zone covers `address`.
    #[must_use]
    pub fn matches(&self, address: &Address) -> bool {
        let country = address.normalized_country();
        if !self
            .countries
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(&country))
        {
            return false;
        }
        if self.cities.is_empty() {
            return true;
        }
        let city = address.normalized_city();
        self.cities.iter().any(|c| c.trim().to_lowercase() == city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_wide_zone_matches_any_city() {
        let zone = Zone::new("rs", "Serbia", ZoneType::National).with_country("RS");
        assert!(zone.matches(&Address::new("Nis", "rs")));
        assert!(!zone.matches(&Address::new("Zagreb", "HR")));
    }

    #[test]
    fn city_zone_requires_city() {
        let zone = Zone::new("vojvodina", "Vojvodina", ZoneType::Regional)
            .with_country("RS")
            .with_city("Novi Sad");
        assert!(zone.matches(&Address::new(" NOVI SAD", "RS")));
        assert!(!zone.matches(&Address::new("Nis", "RS")));
    }
}
