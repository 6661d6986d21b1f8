//! # Domain Entities
//!
//! ## Catalog
//!
//! - [`Provider`]: courier with capabilities and fee parameters
//! - [`PricingRule`]: tiered provider pricing
//! - [`Zone`]: delivery zone record
//! - [`DeliveryAttributes`], [`CategoryDefaults`]: product shipping data
//!
//! ## Quoting
//!
//! - [`Package`]: consolidated parcel
//! - [`ProviderQuote`], [`QuoteSet`]: per-provider and ranked quotes
//!
//! ## Shipments
//!
//! - [`ShipmentRequest`], [`Shipment`], [`ShipmentRecord`], [`TrackingEvent`]
//! - Lookup records: [`Settlement`], [`Street`], [`ParcelLocker`]

pub mod lookup;
pub mod package;
pub mod pricing_rule;
pub mod provider;
pub mod quote;
pub mod shipment;
pub mod zone;

pub use lookup::{
    ParcelLocker, ParcelLockerQuery, RateEstimate, RateRequest, Settlement, SettlementQuery,
    Street, StreetQuery,
};
pub use package::{
    CategoryDefaults, DeliveryAttributes, MAX_WEIGHT_KG, Package, QuoteItem, ResolvedItem,
};
pub use pricing_rule::{PricingRule, VolumeTier, WeightTier};
pub use provider::Provider;
pub use quote::{CostBreakdown, ProviderQuote, QuoteSet};
pub use shipment::{
    Shipment, ShipmentPackage, ShipmentRecord, ShipmentRequest, TrackingEvent, TrackingInfo,
};
pub use zone::Zone;
