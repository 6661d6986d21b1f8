//! # Shipment Entities
//!
//! Shipment requests sent to the delivery microservice, the remote
//! [`Shipment`] it returns, tracking events and the local mirror record.
//!
//! The remote service owns the shipment lifecycle. Locally we keep a
//! [`ShipmentRecord`] linking the tracking number to the marketplace order
//! plus the last known status and tracking history.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Address, Dimensions, ExternalShipmentId, IdempotencyKey, OrderId, ProviderCode, ServiceLevel,
    ShipmentStatus, Timestamp,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One parcel in a shipment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentPackage {
    /// Weight in kg.
    pub weight_kg: Decimal,
    /// Outer dimensions.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Declared value for customs and insurance.
    #[serde(default)]
    pub declared_value: Option<Decimal>,
    /// Contents description.
    #[serde(default)]
    pub description: String,
    /// Fragile contents.
    #[serde(default)]
    pub is_fragile: bool,
}

impl ShipmentPackage {
    /// Creates a package with the given weight.
    #[must_use]
    pub fn new(weight_kg: Decimal) -> Self {
        Self {
            weight_kg,
            dimensions: None,
            declared_value: None,
            description: String::new(),
            is_fragile: false,
        }
    }

    /// Sets dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the declared value.
    #[must_use]
    pub fn with_declared_value(mut self, value: Decimal) -> Self {
        self.declared_value = Some(value);
        self
    }
}

/// Request to create a shipment with a courier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Marketplace order being shipped.
    pub order_id: OrderId,
    /// Courier to use.
    pub provider: ProviderCode,
    /// Sender address.
    pub sender: Address,
    /// Recipient address.
    pub recipient: Address,
    /// Parcels.
    pub packages: Vec<ShipmentPackage>,
    /// Insured value.
    #[serde(default)]
    pub insured_value: Option<Decimal>,
    /// Cash to collect on delivery.
    #[serde(default)]
    pub cod_amount: Option<Decimal>,
    /// Requested speed.
    #[serde(default)]
    pub service_level: ServiceLevel,
    /// Deduplication key for retried creations.
    pub idempotency_key: IdempotencyKey,
}

impl ShipmentRequest {
    /// Creates a request with a fresh idempotency key.
    #[must_use]
    pub fn new(
        order_id: impl Into<OrderId>,
        provider: ProviderCode,
        sender: Address,
        recipient: Address,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            provider,
            sender,
            recipient,
            packages: Vec::new(),
            insured_value: None,
            cod_amount: None,
            service_level: ServiceLevel::Standard,
            idempotency_key: IdempotencyKey::new_v4(),
        }
    }

    /// Adds a package.
    #[must_use]
    pub fn with_package(mut self, package: ShipmentPackage) -> Self {
        self.packages.push(package);
        self
    }

    /// Sets the insured value.
    #[must_use]
    pub fn with_insurance(mut self, value: Decimal) -> Self {
        self.insured_value = Some(value);
        self
    }

    /// Sets the COD amount.
    #[must_use]
    pub fn with_cod(mut self, amount: Decimal) -> Self {
        self.cod_amount = Some(amount);
        self
    }

    /// Sets the service level.
    #[must_use]
    pub fn with_service_level(mut self, level: ServiceLevel) -> Self {
        self.service_level = level;
        self
    }

    /// Validates the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error when there are no packages, a weight or
    /// dimension is negative, a money amount is negative, or an address lacks
    /// city or country.
    pub fn validate(&self) -> DomainResult<()> {
        if self.packages.is_empty() {
            return Err(DomainError::invalid_request("at least one package is required"));
        }
        for (i, p) in self.packages.iter().enumerate() {
            if p.weight_kg.is_sign_negative() {
                return Err(DomainError::invalid_weight(format!(
                    "package {i}: weight cannot be negative"
                )));
            }
            if let Some(d) = &p.dimensions {
                Dimensions::new(d.length(), d.width(), d.height())?;
            }
            if p.declared_value.is_some_and(|v| v.is_sign_negative()) {
                return Err(DomainError::InvalidAmount(format!(
                    "package {i}: declared value cannot be negative"
                )));
            }
        }
        if self.insured_value.is_some_and(|v| v.is_sign_negative()) {
            return Err(DomainError::InvalidAmount(
                "insured value cannot be negative".into(),
            ));
        }
        if self.cod_amount.is_some_and(|v| v.is_sign_negative()) {
            return Err(DomainError::InvalidAmount(
                "COD amount cannot be negative".into(),
            ));
        }
        for (role, addr) in [("sender", &self.sender), ("recipient", &self.recipient)] {
            if addr.city.trim().is_empty() || addr.country.trim().is_empty() {
                return Err(DomainError::invalid_request(format!(
                    "{role} address requires city and country"
                )));
            }
        }
        Ok(())
    }
}

/// A shipment as known by the delivery microservice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Remote id.
    pub id: ExternalShipmentId,
    /// Courier tracking number.
    pub tracking_number: String,
    /// Courier.
    pub provider: ProviderCode,
    /// Lifecycle status.
    pub status: ShipmentStatus,
    /// Sender address.
    pub sender: Address,
    /// Recipient address.
    pub recipient: Address,
    /// Parcels.
    pub packages: Vec<ShipmentPackage>,
    /// Price charged by the courier.
    pub cost: Decimal,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
    /// Expected delivery time, if the courier gives one.
    pub estimated_delivery: Option<Timestamp>,
}

/// A courier tracking event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// When it happened.
    pub timestamp: Timestamp,
    /// Status after the event.
    pub status: ShipmentStatus,
    /// Where it happened.
    pub location: String,
    /// Human readable text.
    pub description: String,
}

/// Tracking result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Tracking number.
    pub tracking_number: String,
    /// Current status.
    pub status: ShipmentStatus,
    /// Events, oldest first.
    pub events: Vec<TrackingEvent>,
    /// True when served from the local mirror because the remote call
    /// failed.
    pub stale: bool,
}

/// Local mirror of a remote shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Marketplace order.
    pub order_id: OrderId,
    /// Last known remote state.
    pub shipment: Shipment,
    /// Tracking history, oldest first.
    pub events: Vec<TrackingEvent>,
    /// Last successful sync with the remote service.
    pub synced_at: Timestamp,
}

impl ShipmentRecord {
    /// Creates a mirror record for a freshly created shipment.
    #[must_use]
    pub fn new(order_id: OrderId, shipment: Shipment) -> Self {
        Self {
            order_id,
            shipment,
            events: Vec::new(),
            synced_at: Timestamp::now(),
        }
    }

    /// Tracking number of the mirrored shipment.
    #[must_use]
    pub fn tracking_number(&self) -> &str {
        &self.shipment.tracking_number
    }

    /// Last known status.
    #[must_use]
    pub fn status(&self) -> ShipmentStatus {
        self.shipment.status
    }

    /// Moves the mirror to `next`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the lifecycle forbids
    /// the change.
    pub fn apply_status(&mut self, next: ShipmentStatus) -> DomainResult<()> {
        let current = self.shipment.status;
        if !current.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        self.shipment.status = next;
        Ok(())
    }

    /// Appends events not already recorded and returns how many were new.
    pub fn merge_events(&mut self, incoming: impl IntoIterator<Item = TrackingEvent>) -> usize {
        let before = self.events.len();
        for event in incoming {
            if !self.events.contains(&event) {
                self.events.push(event);
            }
        }
        self.events.sort_by_key(|e| e.timestamp);
        self.events.len() - before
    }

    /// Replaces the remote snapshot and marks the record synced.
    pub fn refresh(&mut self, shipment: Shipment) {
        self.shipment = shipment;
        self.synced_at = Timestamp::now();
    }

    /// Tracking info served from the mirror.
    #[must_use]
    pub fn to_stale_tracking(&self) -> TrackingInfo {
        TrackingInfo {
            tracking_number: self.shipment.tracking_number.clone(),
            status: self.shipment.status,
            events: self.events.clone(),
            stale: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_shipment(status: ShipmentStatus) -> Shipment {
        let ts = Timestamp::from_secs(1_700_000_000).unwrap();
        Shipment {
            id: ExternalShipmentId::new("EXT123"),
            tracking_number: "TRK123".into(),
            provider: ProviderCode::PostExpress,
            status,
            sender: Address::new("Belgrade", "RS"),
            recipient: Address::new("Novi Sad", "RS"),
            packages: vec![ShipmentPackage::new(Decimal::new(25, 1))],
            cost: Decimal::new(50000, 2),
            created_at: ts,
            updated_at: ts,
            estimated_delivery: None,
        }
    }

    fn event(secs: i64, status: ShipmentStatus) -> TrackingEvent {
        TrackingEvent {
            timestamp: Timestamp::from_secs(secs).unwrap(),
            status,
            location: "Belgrade".into(),
            description: status.to_string(),
        }
    }

    fn request() -> ShipmentRequest {
        ShipmentRequest::new(
            "order-1",
            ProviderCode::PostExpress,
            Address::new("Belgrade", "RS"),
            Address::new("Novi Sad", "RS"),
        )
        .with_package(ShipmentPackage::new(Decimal::new(25, 1)))
    }

    #[test]
    fn validate_accepts_well_formed_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn validate_requires_package() {
        let mut req = request();
        req.packages.clear();
        assert!(matches!(
            req.validate(),
            Err(DomainError::InvalidRequest(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_weight_and_cod() {
        let req = request().with_package(ShipmentPackage::new(Decimal::from(-1)));
        assert!(matches!(req.validate(), Err(DomainError::InvalidWeight(_))));

        let req = request().with_cod(Decimal::from(-5));
        assert!(matches!(req.validate(), Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn validate_requires_recipient_city() {
        let mut req = request();
        req.recipient.city = "  ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn apply_status_follows_lifecycle() {
        let mut rec = ShipmentRecord::new(
            OrderId::new("o1"),
            sample_shipment(ShipmentStatus::InTransit),
        );
        assert!(rec.apply_status(ShipmentStatus::Delivered).is_ok());
        let err = rec.apply_status(ShipmentStatus::Cancelled).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn merge_events_skips_duplicates_and_orders() {
        let mut rec = ShipmentRecord::new(
            OrderId::new("o1"),
            sample_shipment(ShipmentStatus::InTransit),
        );
        let events = [
            event(20, ShipmentStatus::InTransit),
            event(10, ShipmentStatus::Confirmed),
        ];
        assert_eq!(rec.merge_events(events), 2);
        assert_eq!(rec.merge_events([event(20, ShipmentStatus::InTransit)]), 0);
        assert_eq!(rec.events.first().unwrap().status, ShipmentStatus::Confirmed);
    }

    #[test]
    fn stale_tracking_is_flagged() {
        let rec = ShipmentRecord::new(
            OrderId::new("o1"),
            sample_shipment(ShipmentStatus::OutForDelivery),
        );
        let info = rec.to_stale_tracking();
        assert!(info.stale);
        assert_eq!(info.status, ShipmentStatus::OutForDelivery);
        assert_eq!(info.tracking_number, "TRK123");
    }
}
