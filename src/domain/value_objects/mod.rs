//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ProviderId`], [`RuleId`], [`ProductId`], [`CategoryId`], [`OrderId`]
//! - [`ExternalShipmentId`]: id assigned by the delivery microservice
//! - [`IdempotencyKey`]: client-generated key for create requests
//!
//! ## Measurements
//!
//! - [`Dimensions`]: validated package sides with volume math
//! - [`Address`]: postal address
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//!
//! ## Domain Enums
//!
//! - `ZoneType`, `PackagingType`, `ServiceLevel`, `ShipmentStatus`,
//!   `ProviderCode`, `PricingRuleType`

pub mod address;
pub mod arithmetic;
pub mod dimensions;
pub mod enums;
pub mod ids;
pub mod timestamp;

pub use address::Address;
pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use dimensions::{Dimensions, billable_weight};
pub use enums::{
    PackagingType, ParseEnumError, PricingRuleType, ProviderCode, ServiceLevel, ShipmentStatus,
    ZoneType,
};
pub use ids::{
    CategoryId, ExternalShipmentId, IdempotencyKey, OrderId, ProductId, ProviderId, RuleId,
};
pub use timestamp::Timestamp;
