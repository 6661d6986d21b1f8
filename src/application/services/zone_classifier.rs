//! # Zone Classifier
//!
//! Maps an (origin, destination) pair to a [`ZoneType`].
//!
//! 1. Different country: international.
//! 2. Same city (trimmed, case-insensitive): local.
//! 3. Otherwise the closest configured zone covering the destination.
//! 4. No configured zone: national.

use crate::domain::value_objects::{Address, ZoneType};
use crate::infrastructure::persistence::traits::{PricingRepository, RepositoryResult};
use std::sync::Arc;
use tracing::debug;

/// Classifies deliveries into zones.
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    repository: Arc<dyn PricingRepository>,
}

impl ZoneClassifier {
    /// Creates a classifier backed by the zone records of `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn PricingRepository>) -> Self {
        Self { repository }
    }

    /// Classifies a delivery from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns a repository error if zone records cannot be loaded.
    pub async fn classify(
        &self,
        origin: &Address,
        destination: &Address,
    ) -> RepositoryResult<ZoneType> {
        if !origin.same_country(destination) {
            return Ok(ZoneType::International);
        }
        if origin.same_city(destination) {
            return Ok(ZoneType::Local);
        }

        let zones = self.repository.zones_for(destination).await?;
        let zone = zones
            .iter()
            .map(|z| z.zone_type)
            .min()
            .unwrap_or_default();
        debug!(
            destination = %destination,
            matched = zones.len(),
            zone = %zone,
            "classified delivery zone"
        );
        Ok(zone)
    }
}
