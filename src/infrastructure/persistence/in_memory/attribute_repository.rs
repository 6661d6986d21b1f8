//! # In-Memory Attribute Repository
//!
//! In-memory implementation of [`AttributeRepository`] backed by `DashMap`.

use crate::domain::entities::{CategoryDefaults, DeliveryAttributes};
use crate::domain::value_objects::{CategoryId, ProductId};
use crate::infrastructure::persistence::traits::{AttributeRepository, RepositoryResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory implementation of [`AttributeRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributeRepository {
    products: Arc<DashMap<ProductId, DeliveryAttributes>>,
    categories: Arc<DashMap<CategoryId, CategoryDefaults>>,
}

impl InMemoryAttributeRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of products with attributes.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

#[async_trait]
impl AttributeRepository for InMemoryAttributeRepository {
    async fn save_product_attributes(
        &self,
        product_id: &ProductId,
        attributes: &DeliveryAttributes,
    ) -> RepositoryResult<()> {
        self.products.insert(product_id.clone(), attributes.clone());
        Ok(())
    }

    async fn save_category_defaults(&self, defaults: &CategoryDefaults) -> RepositoryResult<()> {
        self.categories
            .insert(defaults.category_id.clone(), defaults.clone());
        Ok(())
    }

    async fn product_attributes(
        &self,
        product_id: &ProductId,
    ) -> RepositoryResult<Option<DeliveryAttributes>> {
        Ok(self.products.get(product_id).map(|a| a.value().clone()))
    }

    async fn category_defaults(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Option<CategoryDefaults>> {
        Ok(self.categories.get(category_id).map(|c| c.value().clone()))
    }
}
