//! # Wire Conversions
//!
//! Mapping between domain types and [`proto`](super::proto) messages.
//!
//! Outbound conversions are infallible. Inbound conversions validate the
//! remote payload and fail with `GatewayError::InvalidResponse`.

use crate::domain::entities::{
    ParcelLocker, ParcelLockerQuery, RateEstimate, RateRequest, Settlement, SettlementQuery,
    Shipment, ShipmentPackage, ShipmentRequest, Street, StreetQuery, TrackingEvent,
};
use crate::domain::value_objects::{
    Address, Dimensions, ExternalShipmentId, ProviderCode, ServiceLevel, ShipmentStatus, Timestamp,
};
use crate::infrastructure::delivery::error::{GatewayError, GatewayResult};
use crate::infrastructure::delivery::proto;
use chrono::DateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

// ---- outbound ----

fn decimal_string(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Wire value of a provider code.
#[must_use]
pub fn provider_to_wire(code: ProviderCode) -> i32 {
    code.as_wire()
}

impl From<&Address> for proto::Address {
    fn from(a: &Address) -> Self {
        Self {
            street: a.street.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            postal_code: a.postal_code.clone(),
            country: a.country.clone(),
            name: a.name.clone(),
            phone: a.phone.clone(),
        }
    }
}

impl From<&ShipmentPackage> for proto::Package {
    fn from(p: &ShipmentPackage) -> Self {
        Self {
            weight: p.weight_kg.to_string(),
            length: decimal_string(p.dimensions.map(|d| d.length())),
            width: decimal_string(p.dimensions.map(|d| d.width())),
            height: decimal_string(p.dimensions.map(|d| d.height())),
            declared_value: decimal_string(p.declared_value),
            description: p.description.clone(),
            is_fragile: p.is_fragile,
        }
    }
}

impl From<&ShipmentRequest> for proto::CreateShipmentRequest {
    fn from(r: &ShipmentRequest) -> Self {
        Self {
            provider: provider_to_wire(r.provider),
            from_address: Some((&r.sender).into()),
            to_address: Some((&r.recipient).into()),
            packages: r.packages.iter().map(Into::into).collect(),
            user_id: String::new(),
            insured_value: decimal_string(r.insured_value),
            cod_amount: decimal_string(r.cod_amount),
            express: r.service_level == ServiceLevel::Express,
            idempotency_key: r.idempotency_key.to_string(),
            order_id: r.order_id.to_string(),
        }
    }
}

impl From<&RateRequest> for proto::CalculateRateRequest {
    fn from(r: &RateRequest) -> Self {
        Self {
            provider: provider_to_wire(r.provider),
            from_address: Some((&r.from).into()),
            to_address: Some((&r.to).into()),
            package: Some((&r.package).into()),
        }
    }
}

impl From<&SettlementQuery> for proto::GetSettlementsRequest {
    fn from(q: &SettlementQuery) -> Self {
        Self {
            provider: provider_to_wire(q.provider),
            search_query: q.search.clone(),
            country: q.country.clone(),
        }
    }
}

impl From<&StreetQuery> for proto::GetStreetsRequest {
    fn from(q: &StreetQuery) -> Self {
        Self {
            provider: provider_to_wire(q.provider),
            settlement_name: q.settlement_name.clone(),
            search_query: q.search.clone(),
        }
    }
}

impl From<&ParcelLockerQuery> for proto::GetParcelLockersRequest {
    fn from(q: &ParcelLockerQuery) -> Self {
        Self {
            provider: provider_to_wire(q.provider),
            city: q.city.clone(),
        }
    }
}

// ---- inbound ----

/// Parses a decimal string; empty means absent.
fn parse_decimal(field: &str, value: &str) -> GatewayResult<Option<Decimal>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed).map(Some).map_err(|e| {
        GatewayError::invalid_response(format!("{field}: '{value}' is not a decimal: {e}"))
    })
}

fn timestamp_from_wire(ts: proto::Timestamp) -> GatewayResult<Timestamp> {
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| GatewayError::invalid_response("timestamp nanos is negative"))?;
    DateTime::from_timestamp(ts.seconds, nanos)
        .map(Timestamp::from)
        .ok_or_else(|| GatewayError::invalid_response("timestamp out of range"))
}

fn optional_timestamp(ts: Option<proto::Timestamp>) -> GatewayResult<Option<Timestamp>> {
    ts.map(timestamp_from_wire).transpose()
}

/// Maps a wire status to the domain status.
///
/// # Errors
///
/// Returns `GatewayError::InvalidResponse` for unspecified or unknown values.
pub fn status_from_wire(value: i32) -> GatewayResult<ShipmentStatus> {
    match proto::ShipmentStatus::try_from(value) {
        Ok(proto::ShipmentStatus::Pending) => Ok(ShipmentStatus::Pending),
        Ok(proto::ShipmentStatus::Confirmed) => Ok(ShipmentStatus::Confirmed),
        Ok(proto::ShipmentStatus::InTransit) => Ok(ShipmentStatus::InTransit),
        Ok(proto::ShipmentStatus::OutForDelivery) => Ok(ShipmentStatus::OutForDelivery),
        Ok(proto::ShipmentStatus::Delivered) => Ok(ShipmentStatus::Delivered),
        Ok(proto::ShipmentStatus::Failed) => Ok(ShipmentStatus::Failed),
        Ok(proto::ShipmentStatus::Cancelled) => Ok(ShipmentStatus::Cancelled),
        Ok(proto::ShipmentStatus::Returned) => Ok(ShipmentStatus::Returned),
        Ok(proto::ShipmentStatus::Unspecified) | Err(_) => Err(GatewayError::invalid_response(
            format!("unknown shipment status {value}"),
        )),
    }
}

/// Maps a domain status to the wire status.
#[must_use]
pub fn status_to_wire(status: ShipmentStatus) -> i32 {
    let wire = match status {
        ShipmentStatus::Pending => proto::ShipmentStatus::Pending,
        ShipmentStatus::Confirmed => proto::ShipmentStatus::Confirmed,
        ShipmentStatus::InTransit => proto::ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery => proto::ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered => proto::ShipmentStatus::Delivered,
        ShipmentStatus::Failed => proto::ShipmentStatus::Failed,
        ShipmentStatus::Cancelled => proto::ShipmentStatus::Cancelled,
        ShipmentStatus::Returned => proto::ShipmentStatus::Returned,
    };
    wire as i32
}

impl From<proto::Address> for Address {
    fn from(a: proto::Address) -> Self {
        Self {
            name: a.name,
            phone: a.phone,
            street: a.street,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
        }
    }
}

impl TryFrom<proto::Package> for ShipmentPackage {
    type Error = GatewayError;

    fn try_from(p: proto::Package) -> GatewayResult<Self> {
        let weight_kg = parse_decimal("package.weight", &p.weight)?.unwrap_or_default();
        let length = parse_decimal("package.length", &p.length)?;
        let width = parse_decimal("package.width", &p.width)?;
        let height = parse_decimal("package.height", &p.height)?;
        let dimensions = match (length, width, height) {
            (Some(l), Some(w), Some(h)) => Some(
                Dimensions::new(l, w, h)
                    .map_err(|e| GatewayError::invalid_response(e.to_string()))?,
            ),
            _ => None,
        };
        Ok(Self {
            weight_kg,
            dimensions,
            declared_value: parse_decimal("package.declared_value", &p.declared_value)?,
            description: p.description,
            is_fragile: p.is_fragile,
        })
    }
}

impl TryFrom<proto::Shipment> for Shipment {
    type Error = GatewayError;

    fn try_from(s: proto::Shipment) -> GatewayResult<Self> {
        if s.id.is_empty() {
            return Err(GatewayError::invalid_response("shipment id is empty"));
        }
        let provider = ProviderCode::from_wire(s.provider).ok_or_else(|| {
            GatewayError::invalid_response(format!("unknown provider {}", s.provider))
        })?;
        let created_at = s
            .created_at
            .map(timestamp_from_wire)
            .transpose()?
            .ok_or_else(|| GatewayError::invalid_response("shipment created_at is missing"))?;
        let updated_at = optional_timestamp(s.updated_at)?.unwrap_or(created_at);
        let packages = s
            .packages
            .into_iter()
            .map(ShipmentPackage::try_from)
            .collect::<GatewayResult<Vec<_>>>()?;

        Ok(Self {
            id: ExternalShipmentId::new(s.id),
            tracking_number: s.tracking_number,
            provider,
            status: status_from_wire(s.status)?,
            sender: s.from_address.map(Address::from).unwrap_or_default(),
            recipient: s.to_address.map(Address::from).unwrap_or_default(),
            packages,
            cost: parse_decimal("shipment.cost", &s.cost)?.unwrap_or_default(),
            created_at,
            updated_at,
            estimated_delivery: optional_timestamp(s.estimated_delivery)?,
        })
    }
}

impl TryFrom<proto::TrackingEvent> for TrackingEvent {
    type Error = GatewayError;

    fn try_from(e: proto::TrackingEvent) -> GatewayResult<Self> {
        let timestamp = optional_timestamp(e.timestamp)?
            .ok_or_else(|| GatewayError::invalid_response("tracking event without timestamp"))?;
        Ok(Self {
            timestamp,
            status: status_from_wire(e.status)?,
            location: e.location,
            description: e.description,
        })
    }
}

/// Extracts the required shipment from a response envelope.
///
/// # Errors
///
/// Returns `GatewayError::InvalidResponse` if the shipment is missing or
/// malformed.
pub fn required_shipment(shipment: Option<proto::Shipment>) -> GatewayResult<Shipment> {
    shipment
        .ok_or_else(|| GatewayError::invalid_response("response carries no shipment"))?
        .try_into()
}

impl TryFrom<proto::CalculateRateResponse> for RateEstimate {
    type Error = GatewayError;

    fn try_from(r: proto::CalculateRateResponse) -> GatewayResult<Self> {
        let cost = parse_decimal("rate.cost", &r.cost)?
            .ok_or_else(|| GatewayError::invalid_response("rate cost is missing"))?;
        Ok(Self {
            cost,
            currency: r.currency,
            estimated_delivery: optional_timestamp(r.estimated_delivery)?,
        })
    }
}

impl From<proto::Settlement> for Settlement {
    fn from(s: proto::Settlement) -> Self {
        Self {
            id: s.id,
            name: s.name,
            postal_code: s.zip_code,
            country: s.country,
        }
    }
}

impl From<proto::Street> for Street {
    fn from(s: proto::Street) -> Self {
        Self {
            id: s.id,
            name: s.name,
            settlement_name: s.settlement_name,
        }
    }
}

impl From<proto::ParcelLocker> for ParcelLocker {
    fn from(l: proto::ParcelLocker) -> Self {
        Self {
            id: l.id,
            code: l.code,
            name: l.name,
            address: l.address,
            city: l.city,
            postal_code: l.zip_code,
            latitude: l.latitude,
            longitude: l.longitude,
            available: l.available,
        }
    }
}

/// Wire timestamp for a domain timestamp.
#[must_use]
pub fn timestamp_to_wire(ts: Timestamp) -> proto::Timestamp {
    let dt = ts.as_datetime();
    proto::Timestamp {
        seconds: dt.timestamp(),
        nanos: i32::try_from(dt.timestamp_subsec_nanos()).unwrap_or(0),
    }
}
