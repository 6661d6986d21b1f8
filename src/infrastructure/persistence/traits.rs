//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! The quote engine and shipment service only see these traits; the
//! marketplace plugs in its own storage. In-memory implementations live in
//! [`in_memory`](super::in_memory).
//!
//! # Available Repositories
//!
//! - [`PricingRepository`]: providers, pricing rules and zone records
//! - [`AttributeRepository`]: product attributes and category defaults
//! - [`ShipmentRepository`]: local mirror of remote shipments
//!
//! # Examples
//!
//! ```ignore
//! use delivery_gateway::infrastructure::persistence::traits::PricingRepository;
//!
//! async fn list_active(repo: &impl PricingRepository) {
//!     let providers = repo.active_providers().await.unwrap();
//!     println!("Found {} active providers", providers.len());
//! }
//! ```

use crate::domain::entities::{
    CategoryDefaults, DeliveryAttributes, PricingRule, Provider, ShipmentRecord, Zone,
};
use crate::domain::value_objects::{
    Address, CategoryId, ExternalShipmentId, OrderId, ProductId, ProviderId,
};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Catalog of providers, their pricing rules and zone records.
///
/// Read-mostly; implementations must support concurrent readers.
#[async_trait]
pub trait PricingRepository: Send + Sync + fmt::Debug {
    /// Saves a provider, replacing any provider with the same id.
    async fn save_provider(&self, provider: &Provider) -> RepositoryResult<()>;

    /// Saves a pricing rule, replacing any rule with the same id.
    async fn save_rule(&self, rule: &PricingRule) -> RepositoryResult<()>;

    /// Saves a zone record.
    async fn save_zone(&self, zone: &Zone) -> RepositoryResult<()>;

    /// Gets a provider by id.
    async fn get_provider(&self, id: &ProviderId) -> RepositoryResult<Option<Provider>>;

    /// Active providers in registration order.
    async fn active_providers(&self) -> RepositoryResult<Vec<Provider>>;

    /// Active rules of a provider, highest priority first.
    ///
    /// Rules with equal priority keep registration order.
    async fn active_rules(&self, provider_id: &ProviderId) -> RepositoryResult<Vec<PricingRule>>;

    /// Zone records covering `destination`, ordered local to international.
    async fn zones_for(&self, destination: &Address) -> RepositoryResult<Vec<Zone>>;
}

/// Per-product delivery attributes and per-category defaults.
#[async_trait]
pub trait AttributeRepository: Send + Sync + fmt::Debug {
    /// Saves the attributes of a product.
    async fn save_product_attributes(
        &self,
        product_id: &ProductId,
        attributes: &DeliveryAttributes,
    ) -> RepositoryResult<()>;

    /// Saves category defaults.
    async fn save_category_defaults(&self, defaults: &CategoryDefaults) -> RepositoryResult<()>;

    /// Attributes declared for a product.
    async fn product_attributes(
        &self,
        product_id: &ProductId,
    ) -> RepositoryResult<Option<DeliveryAttributes>>;

    /// Defaults of a category.
    async fn category_defaults(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Option<CategoryDefaults>>;
}

/// Local mirror of shipments created through the gateway.
#[async_trait]
pub trait ShipmentRepository: Send + Sync + fmt::Debug {
    /// Saves a record, keyed by tracking number and external id.
    async fn save(&self, record: &ShipmentRecord) -> RepositoryResult<()>;

    /// Gets a record by tracking number.
    async fn get_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> RepositoryResult<Option<ShipmentRecord>>;

    /// Gets a record by the remote shipment id.
    async fn get_by_external_id(
        &self,
        id: &ExternalShipmentId,
    ) -> RepositoryResult<Option<ShipmentRecord>>;

    /// All records of an order.
    async fn find_by_order(&self, order_id: &OrderId) -> RepositoryResult<Vec<ShipmentRecord>>;

    /// Number of records.
    async fn count(&self) -> RepositoryResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_helpers() {
        let err = RepositoryError::not_found("Provider", "p-1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: Provider with id p-1");
    }
}
