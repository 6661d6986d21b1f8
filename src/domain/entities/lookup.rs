//! # Lookup Records
//!
//! Courier reference data served by the delivery microservice: settlements,
//! streets, parcel lockers and rate estimates.

use crate::domain::entities::shipment::ShipmentPackage;
use crate::domain::value_objects::{Address, ProviderCode, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A settlement (town or village) known to a courier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Courier-side id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Postal code.
    pub postal_code: String,
    /// Country code.
    pub country: String,
}

/// A street within a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    /// Courier-side id.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Settlement the street belongs to.
    pub settlement_name: String,
}

/// A self-service parcel locker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelLocker {
    /// Courier-side id.
    pub id: i64,
    /// Locker code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Accepting parcels right now.
    pub available: bool,
}

/// Settlement search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementQuery {
    /// Courier to ask.
    pub provider: ProviderCode,
    /// Name prefix.
    pub search: String,
    /// Country code.
    pub country: String,
}

/// Street search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetQuery {
    /// Courier to ask.
    pub provider: ProviderCode,
    /// Settlement to search in.
    pub settlement_name: String,
    /// Name prefix.
    pub search: String,
}

/// Parcel locker search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelLockerQuery {
    /// Courier to ask.
    pub provider: ProviderCode,
    /// City.
    pub city: String,
}

/// Remote rate request for a single parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRequest {
    /// Courier to ask.
    pub provider: ProviderCode,
    /// Origin.
    pub from: Address,
    /// Destination.
    pub to: Address,
    /// Parcel.
    pub package: ShipmentPackage,
}

/// Courier rate estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEstimate {
    /// Price.
    pub cost: Decimal,
    /// ISO 4217 currency.
    pub currency: String,
    /// Expected delivery time.
    pub estimated_delivery: Option<Timestamp>,
}
