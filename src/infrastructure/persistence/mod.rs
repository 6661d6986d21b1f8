//! # Persistence Layer
//!
//! Repository ports and in-memory implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`PricingRepository`]: providers, pricing rules, zones
//! - [`AttributeRepository`]: product attributes and category defaults
//! - [`ShipmentRepository`]: local shipment mirror
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for tests and the CLI

pub mod in_memory;
pub mod traits;

pub use traits::{
    AttributeRepository, PricingRepository, RepositoryError, RepositoryResult, ShipmentRepository,
};
