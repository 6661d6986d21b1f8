//! # In-Memory Shipment Repository
//!
//! In-memory implementation of [`ShipmentRepository`].
//!
//! Records are keyed by tracking number with a secondary index on the
//! remote shipment id.

use crate::domain::entities::ShipmentRecord;
use crate::domain::value_objects::{ExternalShipmentId, OrderId};
use crate::infrastructure::persistence::traits::{RepositoryResult, ShipmentRepository};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory implementation of [`ShipmentRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryShipmentRepository {
    records: Arc<DashMap<String, ShipmentRecord>>,
    by_external_id: Arc<DashMap<ExternalShipmentId, String>>,
}

impl InMemoryShipmentRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn save(&self, record: &ShipmentRecord) -> RepositoryResult<()> {
        let tracking_number = record.tracking_number().to_string();
        self.by_external_id
            .insert(record.shipment.id.clone(), tracking_number.clone());
        self.records.insert(tracking_number, record.clone());
        Ok(())
    }

    async fn get_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> RepositoryResult<Option<ShipmentRecord>> {
        Ok(self.records.get(tracking_number).map(|r| r.value().clone()))
    }

    async fn get_by_external_id(
        &self,
        id: &ExternalShipmentId,
    ) -> RepositoryResult<Option<ShipmentRecord>> {
        let Some(tracking_number) = self.by_external_id.get(id).map(|t| t.value().clone()) else {
            return Ok(None);
        };
        Ok(self.records.get(&tracking_number).map(|r| r.value().clone()))
    }

    async fn find_by_order(&self, order_id: &OrderId) -> RepositoryResult<Vec<ShipmentRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| &r.order_id == order_id)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.records.len() as u64)
    }
}
