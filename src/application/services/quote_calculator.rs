//! # Quote Calculator
//!
//! Orchestrates quote calculation across all active providers.
//!
//! For each request the calculator:
//!
//! 1. resolves item attributes (inline, product, category defaults, global
//!    default),
//! 2. packs items with the [`PackagingOptimizer`],
//! 3. classifies the zone once with the [`ZoneClassifier`],
//! 4. prices every active provider concurrently with the
//!    [`PricingEvaluator`], keeping provider order,
//! 5. selects the cheapest, fastest and recommended quotes.
//!
//! A provider that cannot be priced is reported unavailable with the reason
//! and never fails the batch.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::packaging::PackagingOptimizer;
use crate::application::services::pricing::{PricingEvaluator, PricingOptions};
use crate::application::services::ranking_strategy::{
    CheapestStrategy, DEFAULT_DAY_WEIGHT, FastestStrategy, RankingStrategy, RecommendedStrategy,
};
use crate::application::services::zone_classifier::ZoneClassifier;
use crate::domain::entities::{
    DeliveryAttributes, Package, Provider, ProviderQuote, QuoteItem, QuoteSet, ResolvedItem,
};
use crate::domain::value_objects::dimensions::DEFAULT_VOLUMETRIC_DIVISOR;
use crate::domain::value_objects::{Address, ServiceLevel, Timestamp, ZoneType};
use crate::infrastructure::persistence::traits::{AttributeRepository, PricingRepository};
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for quote calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Price-equivalent of one delivery day in the recommendation score.
    pub day_weight: Decimal,
    /// Divisor for providers that configure none.
    pub default_volumetric_divisor: Decimal,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            day_weight: DEFAULT_DAY_WEIGHT,
            default_volumetric_divisor: Decimal::from(DEFAULT_VOLUMETRIC_DIVISOR),
        }
    }
}

impl QuoteConfig {
    /// Sets the recommendation day weight.
    #[must_use]
    pub fn with_day_weight(mut self, day_weight: Decimal) -> Self {
        self.day_weight = day_weight;
        self
    }
}

/// A request for delivery quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Pick-up address.
    pub origin: Address,
    /// Delivery address.
    pub destination: Address,
    /// Items to ship.
    pub items: Vec<QuoteItem>,
    /// Requested service level.
    #[serde(default)]
    pub service_level: ServiceLevel,
    /// Optional services.
    #[serde(default)]
    pub options: PricingOptions,
}

impl QuoteRequest {
    /// Creates a standard-service request without items.
    #[must_use]
    pub fn new(origin: Address, destination: Address) -> Self {
        Self {
            origin,
            destination,
            items: Vec::new(),
            service_level: ServiceLevel::Standard,
            options: PricingOptions::default(),
        }
    }

    /// Adds an item.
    #[must_use]
    pub fn with_item(mut self, item: QuoteItem) -> Self {
        self.items.push(item);
        self
    }

    /// Sets the service level.
    #[must_use]
    pub fn with_service_level(mut self, level: ServiceLevel) -> Self {
        self.service_level = level;
        self
    }

    /// Sets optional services.
    #[must_use]
    pub fn with_options(mut self, options: PricingOptions) -> Self {
        self.options = options;
        self
    }
}

/// Computes ranked quotes across providers.
#[derive(Debug, Clone)]
pub struct QuoteCalculator {
    pricing: Arc<dyn PricingRepository>,
    attributes: Arc<dyn AttributeRepository>,
    zones: ZoneClassifier,
    optimizer: PackagingOptimizer,
    evaluator: PricingEvaluator,
    recommended: RecommendedStrategy,
    config: QuoteConfig,
}

impl QuoteCalculator {
    /// Creates a new calculator.
    #[must_use]
    pub fn new(
        pricing: Arc<dyn PricingRepository>,
        attributes: Arc<dyn AttributeRepository>,
        config: QuoteConfig,
    ) -> Self {
        Self {
            zones: ZoneClassifier::new(Arc::clone(&pricing)),
            pricing,
            attributes,
            optimizer: PackagingOptimizer::new(),
            evaluator: PricingEvaluator::new(),
            recommended: RecommendedStrategy::new(config.day_weight),
            config,
        }
    }

    /// Creates a calculator with default configuration.
    #[must_use]
    pub fn with_defaults(
        pricing: Arc<dyn PricingRepository>,
        attributes: Arc<dyn AttributeRepository>,
    ) -> Self {
        Self::new(pricing, attributes, QuoteConfig::default())
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Quotes `request` with every active provider.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Validation` if the request has no items
    /// - `ApplicationError::Domain` if item attributes are invalid
    /// - `ApplicationError::Repository` if the catalog cannot be read
    pub async fn quote(&self, request: &QuoteRequest) -> ApplicationResult<QuoteSet> {
        if request.items.is_empty() {
            return Err(ApplicationError::validation("quote request has no items"));
        }

        let mut resolved = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let attributes = self.resolve_attributes(item).await?;
            resolved.push(ResolvedItem::new(attributes, item.quantity));
        }
        let packages = self.optimizer.optimize(&resolved)?;
        let zone = self
            .zones
            .classify(&request.origin, &request.destination)
            .await?;

        let providers = self.pricing.active_providers().await?;
        let quotes: Vec<ProviderQuote> = join_all(
            providers
                .iter()
                .map(|p| self.quote_provider(p, &packages, zone, request)),
        )
        .await;

        let cheapest = CheapestStrategy.select(&quotes).cloned();
        let fastest = FastestStrategy.select(&quotes).cloned();
        let recommended = self.recommended.select(&quotes).cloned();

        info!(
            zone = %zone,
            packages = packages.len(),
            providers = quotes.len(),
            available = quotes.iter().filter(|q| q.is_available).count(),
            "quote calculated"
        );

        Ok(QuoteSet {
            providers: quotes,
            cheapest,
            fastest,
            recommended,
            zone,
            packages,
            calculated_at: Timestamp::now(),
        })
    }

    /// Inline attributes, then product attributes, then category defaults,
    /// then the global default.
    async fn resolve_attributes(&self, item: &QuoteItem) -> ApplicationResult<DeliveryAttributes> {
        if let Some(attributes) = &item.attributes {
            return Ok(attributes.clone());
        }
        if let Some(attributes) = self.attributes.product_attributes(&item.product_id).await? {
            return Ok(attributes);
        }
        if let Some(category_id) = &item.category_id {
            if let Some(defaults) = self.attributes.category_defaults(category_id).await? {
                return Ok(defaults.to_attributes());
            }
        }
        Ok(DeliveryAttributes::global_default())
    }

    async fn quote_provider(
        &self,
        provider: &Provider,
        packages: &[Package],
        zone: ZoneType,
        request: &QuoteRequest,
    ) -> ProviderQuote {
        let unavailable = |reason: String| {
            debug!(provider = %provider, reason = %reason, "provider unavailable");
            ProviderQuote::unavailable(
                provider.id.clone(),
                provider.code,
                provider.name.clone(),
                request.service_level,
                reason,
            )
        };

        let rules = match self.pricing.active_rules(&provider.id).await {
            Ok(rules) => rules,
            Err(e) => return unavailable(e.to_string()),
        };

        let mut effective = provider.clone();
        if effective.volumetric_divisor <= Decimal::ZERO {
            effective.volumetric_divisor = self.config.default_volumetric_divisor;
        }

        match self
            .evaluator
            .evaluate(&effective, &rules, packages, zone, &request.options)
        {
            Ok(priced) => ProviderQuote::available(
                provider.id.clone(),
                provider.code,
                provider.name.clone(),
                request.service_level,
                priced.breakdown,
                provider.estimated_days(zone, request.service_level),
                priced.rule_id,
            ),
            Err(e) => unavailable(e.to_string()),
        }
    }
}
