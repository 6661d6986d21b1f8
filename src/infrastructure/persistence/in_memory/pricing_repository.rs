//! # In-Memory Pricing Repository
//!
//! In-memory implementation of [`PricingRepository`].
//!
//! Providers and rules keep registration order so quotes list providers in
//! the order they were configured and equal-priority rules stay stable.

use crate::domain::entities::{PricingRule, Provider, Zone};
use crate::domain::value_objects::{Address, ProviderId};
use crate::infrastructure::persistence::traits::{PricingRepository, RepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Catalog {
    providers: Vec<Provider>,
    rules: Vec<PricingRule>,
    zones: Vec<Zone>,
}

/// In-memory implementation of [`PricingRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPricingRepository {
    storage: Arc<RwLock<Catalog>>,
}

impl InMemoryPricingRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with a catalog.
    #[must_use]
    pub fn with_catalog(
        providers: Vec<Provider>,
        rules: Vec<PricingRule>,
        zones: Vec<Zone>,
    ) -> Self {
        Self {
            storage: Arc::new(RwLock::new(Catalog {
                providers,
                rules,
                zones,
            })),
        }
    }

    /// Number of providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.providers.len())
            .unwrap_or(0)
    }

    /// Clears the catalog.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        *storage = Catalog::default();
    }
}

#[async_trait]
impl PricingRepository for InMemoryPricingRepository {
    async fn save_provider(&self, provider: &Provider) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        match storage.providers.iter_mut().find(|p| p.id == provider.id) {
            Some(existing) => *existing = provider.clone(),
            None => storage.providers.push(provider.clone()),
        }
        Ok(())
    }

    async fn save_rule(&self, rule: &PricingRule) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        match storage.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule.clone(),
            None => storage.rules.push(rule.clone()),
        }
        Ok(())
    }

    async fn save_zone(&self, zone: &Zone) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        match storage.zones.iter_mut().find(|z| z.id == zone.id) {
            Some(existing) => *existing = zone.clone(),
            None => storage.zones.push(zone.clone()),
        }
        Ok(())
    }

    async fn get_provider(&self, id: &ProviderId) -> RepositoryResult<Option<Provider>> {
        let storage = self.storage.read().await;
        Ok(storage.providers.iter().find(|p| &p.id == id).cloned())
    }

    async fn active_providers(&self) -> RepositoryResult<Vec<Provider>> {
        let storage = self.storage.read().await;
        Ok(storage
            .providers
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    async fn active_rules(&self, provider_id: &ProviderId) -> RepositoryResult<Vec<PricingRule>> {
        let storage = self.storage.read().await;
        let mut rules: Vec<PricingRule> = storage
            .rules
            .iter()
            .filter(|r| r.is_active && &r.provider_id == provider_id)
            .cloned()
            .collect();
        // Stable sort keeps registration order within a priority.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(rules)
    }

    async fn zones_for(&self, destination: &Address) -> RepositoryResult<Vec<Zone>> {
        let storage = self.storage.read().await;
        let mut zones: Vec<Zone> = storage
            .zones
            .iter()
            .filter(|z| z.matches(destination))
            .cloned()
            .collect();
        zones.sort_by_key(|z| z.zone_type);
        Ok(zones)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{PricingRuleType, ProviderCode, RuleId, ZoneType};

    fn provider(id: &str, active: bool) -> Provider {
        Provider::new(id, ProviderCode::PostExpress, id).with_active(active)
    }

    fn rule(id: &str, provider: &str, priority: i32) -> PricingRule {
        PricingRule::new(RuleId::new(id), ProviderId::new(provider), PricingRuleType::WeightBased)
            .with_priority(priority)
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryPricingRepository::new();
        assert_eq!(repo.provider_count(), 0);
        assert!(repo.active_providers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn active_providers_keep_registration_order() {
        let repo = InMemoryPricingRepository::new();
        repo.save_provider(&provider("b", true)).await.unwrap();
        repo.save_provider(&provider("off", false)).await.unwrap();
        repo.save_provider(&provider("a", true)).await.unwrap();

        let ids: Vec<String> = repo
            .active_providers()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn save_provider_replaces_existing() {
        let repo = InMemoryPricingRepository::new();
        repo.save_provider(&provider("p", true)).await.unwrap();
        repo.save_provider(&provider("p", false)).await.unwrap();

        assert_eq!(repo.provider_count(), 1);
        let stored = repo.get_provider(&ProviderId::new("p")).await.unwrap().unwrap();
        assert!(!stored.is_active);
    }

    #[tokio::test]
    async fn rules_sorted_by_priority_desc() {
        let repo = InMemoryPricingRepository::new();
        repo.save_rule(&rule("low", "p", 1)).await.unwrap();
        repo.save_rule(&rule("high", "p", 10)).await.unwrap();
        repo.save_rule(&rule("low-2", "p", 1)).await.unwrap();
        repo.save_rule(&rule("other", "q", 100)).await.unwrap();
        repo.save_rule(&rule("inactive", "p", 50).with_active(false))
            .await
            .unwrap();

        let ids: Vec<String> = repo
            .active_rules(&ProviderId::new("p"))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["high", "low", "low-2"]);
    }

    #[tokio::test]
    async fn zones_ordered_local_first() {
        let repo = InMemoryPricingRepository::with_catalog(
            Vec::new(),
            Vec::new(),
            vec![
                Zone::new("rs", "Serbia", ZoneType::National).with_country("RS"),
                Zone::new("bg", "Belgrade", ZoneType::Local)
                    .with_country("RS")
                    .with_city("Belgrade"),
                Zone::new("de", "Germany", ZoneType::International).with_country("DE"),
            ],
        );

        let zones = repo
            .zones_for(&Address::new("belgrade", "rs"))
            .await
            .unwrap();
        let types: Vec<ZoneType> = zones.iter().map(|z| z.zone_type).collect();
        assert_eq!(types, vec![ZoneType::Local, ZoneType::National]);
    }
}
