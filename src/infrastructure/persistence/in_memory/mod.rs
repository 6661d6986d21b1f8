//! # In-Memory Repositories
//!
//! In-memory implementations without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryPricingRepository`]: provider catalog, `tokio::sync::RwLock`
//! - [`InMemoryAttributeRepository`]: product attributes, `DashMap`
//! - [`InMemoryShipmentRepository`]: shipment mirror, `DashMap`

pub mod attribute_repository;
pub mod pricing_repository;
pub mod shipment_repository;

pub use attribute_repository::InMemoryAttributeRepository;
pub use pricing_repository::InMemoryPricingRepository;
pub use shipment_repository::InMemoryShipmentRepository;
