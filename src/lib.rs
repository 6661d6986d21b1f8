//! # Delivery Gateway
//!
//! Delivery-provider integration for the marketplace.
//!
//! The crate has two halves:
//!
//! - **Quote calculation**: packaging optimization, delivery-zone
//!   classification, tiered pricing rules and multi-provider quote ranking
//!   (cheapest, fastest, recommended). See
//!   [`application::services::QuoteCalculator`].
//! - **Resilient gateway**: a client for the remote delivery microservice with
//!   per-call deadlines, exponential backoff retries, error classification and
//!   a per-destination circuit breaker. See
//!   [`infrastructure::delivery::ResilientGateway`].
//!
//! ## Layout
//!
//! ```text
//! domain/          value objects and entities (packages, rules, quotes, shipments)
//! application/     quote calculator, pricing, zones, packaging, shipment service
//! infrastructure/  gateway, gRPC transport, repository ports and in-memory adapters
//! config           layered configuration (defaults, file, environment)
//! telemetry        tracing subscriber setup
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
