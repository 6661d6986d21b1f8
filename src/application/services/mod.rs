//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`QuoteCalculator`]: multi-provider delivery quotes
//! - [`PackagingOptimizer`]: cart items into packages
//! - [`ZoneClassifier`]: origin/destination into a delivery zone
//! - [`PricingEvaluator`]: pricing rules into a cost breakdown
//! - [`RankingStrategy`]: cheapest, fastest and recommended selection
//! - [`ShipmentService`]: shipment lifecycle through the resilient gateway

pub mod packaging;
pub mod pricing;
pub mod quote_calculator;
pub mod ranking_strategy;
pub mod shipment_service;
pub mod zone_classifier;

pub use packaging::PackagingOptimizer;
pub use pricing::{PricedRule, PricingError, PricingEvaluator, PricingOptions, PricingResult};
pub use quote_calculator::{QuoteCalculator, QuoteConfig, QuoteRequest};
pub use ranking_strategy::{
    CheapestStrategy, DEFAULT_DAY_WEIGHT, FastestStrategy, RankingStrategy,
    RecommendationScore, RecommendedStrategy,
};
pub use shipment_service::ShipmentService;
pub use zone_classifier::ZoneClassifier;
