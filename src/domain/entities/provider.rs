//! # Provider Entity
//!
//! A courier provider with its capabilities and fee parameters.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::domain::entities::provider::Provider;
//! use delivery_gateway::domain::value_objects::{ProviderCode, ServiceLevel, ZoneType};
//!
//! let provider = Provider::new("1", ProviderCode::PostExpress, "Post Express")
//!     .with_delivery_days(ZoneType::National, 2);
//!
//! assert_eq!(provider.estimated_days(ZoneType::National, ServiceLevel::Standard), 2);
//! assert_eq!(provider.estimated_days(ZoneType::Local, ServiceLevel::Express), 1);
//! ```

use crate::domain::value_objects::dimensions::DEFAULT_VOLUMETRIC_DIVISOR;
use crate::domain::value_objects::{ProviderCode, ProviderId, ServiceLevel, ZoneType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A courier provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider id.
    pub id: ProviderId,
    /// Provider code.
    pub code: ProviderCode,
    /// Display name.
    pub name: String,
    /// Inactive providers are not quoted.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Accepts cash on delivery.
    #[serde(default)]
    pub supports_cod: bool,
    /// Accepts declared-value insurance.
    #[serde(default)]
    pub supports_insurance: bool,
    /// Offers tracking.
    #[serde(default = "default_true")]
    pub supports_tracking: bool,
    /// cm3 per kg used for volumetric weight.
    #[serde(default = "default_divisor")]
    pub volumetric_divisor: Decimal,
    /// Fuel surcharge as a fraction of base price plus weight surcharge.
    #[serde(default)]
    pub fuel_surcharge_rate: Decimal,
    /// Flat fee for remote destinations.
    #[serde(default)]
    pub remote_area_surcharge: Decimal,
    /// Tax as a fraction of the pre-tax subtotal.
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Per-zone delivery day overrides.
    #[serde(default)]
    pub delivery_days: BTreeMap<ZoneType, u32>,
}

fn default_true() -> bool {
    true
}

fn default_divisor() -> Decimal {
    Decimal::from(DEFAULT_VOLUMETRIC_DIVISOR)
}

impl Provider {
    /// Creates an active provider with default parameters.
    #[must_use]
    pub fn new(id: impl Into<ProviderId>, code: ProviderCode, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code,
            name: name.into(),
            is_active: true,
            supports_cod: false,
            supports_insurance: false,
            supports_tracking: true,
            volumetric_divisor: default_divisor(),
            fuel_surcharge_rate: Decimal::ZERO,
            remote_area_surcharge: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            delivery_days: BTreeMap::new(),
        }
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets COD and insurance support.
    #[must_use]
    pub fn with_capabilities(mut self, supports_cod: bool, supports_insurance: bool) -> Self {
        self.supports_cod = supports_cod;
        self.supports_insurance = supports_insurance;
        self
    }

    /// Sets the volumetric divisor.
    #[must_use]
    pub fn with_volumetric_divisor(mut self, divisor: Decimal) -> Self {
        self.volumetric_divisor = divisor;
        self
    }

    /// Sets fuel rate, remote-area fee and tax rate.
    #[must_use]
    pub fn with_fees(
        mut self,
        fuel_rate: Decimal,
        remote_area: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        self.fuel_surcharge_rate = fuel_rate;
        self.remote_area_surcharge = remote_area;
        self.tax_rate = tax_rate;
        self
    }

    /// Overrides the delivery estimate for a zone.
    #[must_use]
    pub fn with_delivery_days(mut self, zone: ZoneType, days: u32) -> Self {
        self.delivery_days.insert(zone, days);
        self
    }

    /// Estimated delivery days for a zone and service level.
    #[must_use]
    pub fn estimated_days(&self, zone: ZoneType, level: ServiceLevel) -> u32 {
        let days = self
            .delivery_days
            .get(&zone)
            .copied()
            .unwrap_or_else(|| zone.default_delivery_days());
        level.adjust_days(days)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
