//! # Wire Messages
//!
//! Protobuf messages of the `delivery.v1.DeliveryService` API.
//!
//! Numeric amounts (weights, sizes, money) travel as decimal strings so no
//! precision is lost. [`Timestamp`] has the same wire layout as
//! `google.protobuf.Timestamp`.

#![allow(missing_docs)]

/// Fully qualified service name.
pub const SERVICE_NAME: &str = "delivery.v1.DeliveryService";

/// gRPC method paths.
pub mod paths {
    pub const CREATE_SHIPMENT: &str = "/delivery.v1.DeliveryService/CreateShipment";
    pub const GET_SHIPMENT: &str = "/delivery.v1.DeliveryService/GetShipment";
    pub const TRACK_SHIPMENT: &str = "/delivery.v1.DeliveryService/TrackShipment";
    pub const CANCEL_SHIPMENT: &str = "/delivery.v1.DeliveryService/CancelShipment";
    pub const CALCULATE_RATE: &str = "/delivery.v1.DeliveryService/CalculateRate";
    pub const GET_SETTLEMENTS: &str = "/delivery.v1.DeliveryService/GetSettlements";
    pub const GET_STREETS: &str = "/delivery.v1.DeliveryService/GetStreets";
    pub const GET_PARCEL_LOCKERS: &str = "/delivery.v1.DeliveryService/GetParcelLockers";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DeliveryProvider {
    Unspecified = 0,
    PostExpress = 1,
    BexExpress = 2,
    AksExpress = 3,
    DExpress = 4,
    CityExpress = 5,
    Dhl = 6,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ShipmentStatus {
    Unspecified = 0,
    Pending = 1,
    Confirmed = 2,
    InTransit = 3,
    OutForDelivery = 4,
    Delivered = 5,
    Failed = 6,
    Cancelled = 7,
    Returned = 8,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Address {
    #[prost(string, tag = "1")]
    pub street: String,
    #[prost(string, tag = "2")]
    pub city: String,
    #[prost(string, tag = "3")]
    pub postal_code: String,
    #[prost(string, tag = "4")]
    pub country: String,
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(string, tag = "6")]
    pub phone: String,
    #[prost(string, tag = "7")]
    pub state: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Package {
    #[prost(string, tag = "1")]
    pub weight: String,
    #[prost(string, tag = "2")]
    pub length: String,
    #[prost(string, tag = "3")]
    pub width: String,
    #[prost(string, tag = "4")]
    pub height: String,
    #[prost(string, tag = "5")]
    pub declared_value: String,
    #[prost(string, tag = "6")]
    pub description: String,
    #[prost(bool, tag = "7")]
    pub is_fragile: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Shipment {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub tracking_number: String,
    #[prost(enumeration = "ShipmentStatus", tag = "3")]
    pub status: i32,
    #[prost(message, optional, tag = "4")]
    pub from_address: Option<Address>,
    #[prost(message, optional, tag = "5")]
    pub to_address: Option<Address>,
    #[prost(message, repeated, tag = "6")]
    pub packages: Vec<Package>,
    #[prost(string, tag = "7")]
    pub cost: String,
    #[prost(message, optional, tag = "8")]
    pub created_at: Option<Timestamp>,
    #[prost(message, optional, tag = "9")]
    pub updated_at: Option<Timestamp>,
    #[prost(message, optional, tag = "10")]
    pub estimated_delivery: Option<Timestamp>,
    #[prost(enumeration = "DeliveryProvider", tag = "11")]
    pub provider: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TrackingEvent {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,
    #[prost(enumeration = "ShipmentStatus", tag = "2")]
    pub status: i32,
    #[prost(string, tag = "3")]
    pub location: String,
    #[prost(string, tag = "4")]
    pub description: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateShipmentRequest {
    #[prost(enumeration = "DeliveryProvider", tag = "1")]
    pub provider: i32,
    #[prost(message, optional, tag = "2")]
    pub from_address: Option<Address>,
    #[prost(message, optional, tag = "3")]
    pub to_address: Option<Address>,
    #[prost(message, repeated, tag = "4")]
    pub packages: Vec<Package>,
    #[prost(string, tag = "5")]
    pub user_id: String,
    #[prost(string, tag = "6")]
    pub insured_value: String,
    #[prost(string, tag = "7")]
    pub cod_amount: String,
    #[prost(bool, tag = "8")]
    pub express: bool,
    #[prost(string, tag = "9")]
    pub idempotency_key: String,
    #[prost(string, tag = "10")]
    pub order_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateShipmentResponse {
    #[prost(message, optional, tag = "1")]
    pub shipment: Option<Shipment>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetShipmentRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetShipmentResponse {
    #[prost(message, optional, tag = "1")]
    pub shipment: Option<Shipment>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TrackShipmentRequest {
    #[prost(string, tag = "1")]
    pub tracking_number: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TrackShipmentResponse {
    #[prost(message, optional, tag = "1")]
    pub shipment: Option<Shipment>,
    #[prost(message, repeated, tag = "2")]
    pub events: Vec<TrackingEvent>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct CancelShipmentRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub reason: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelShipmentResponse {
    #[prost(message, optional, tag = "1")]
    pub shipment: Option<Shipment>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CalculateRateRequest {
    #[prost(enumeration = "DeliveryProvider", tag = "1")]
    pub provider: i32,
    #[prost(message, optional, tag = "2")]
    pub from_address: Option<Address>,
    #[prost(message, optional, tag = "3")]
    pub to_address: Option<Address>,
    #[prost(message, optional, tag = "4")]
    pub package: Option<Package>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CalculateRateResponse {
    #[prost(string, tag = "1")]
    pub cost: String,
    #[prost(string, tag = "2")]
    pub currency: String,
    #[prost(message, optional, tag = "3")]
    pub estimated_delivery: Option<Timestamp>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetSettlementsRequest {
    #[prost(enumeration = "DeliveryProvider", tag = "1")]
    pub provider: i32,
    #[prost(string, tag = "2")]
    pub search_query: String,
    #[prost(string, tag = "3")]
    pub country: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Settlement {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub zip_code: String,
    #[prost(string, tag = "4")]
    pub country: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSettlementsResponse {
    #[prost(message, repeated, tag = "1")]
    pub settlements: Vec<Settlement>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetStreetsRequest {
    #[prost(enumeration = "DeliveryProvider", tag = "1")]
    pub provider: i32,
    #[prost(string, tag = "2")]
    pub settlement_name: String,
    #[prost(string, tag = "3")]
    pub search_query: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Street {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub settlement_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetStreetsResponse {
    #[prost(message, repeated, tag = "1")]
    pub streets: Vec<Street>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetParcelLockersRequest {
    #[prost(enumeration = "DeliveryProvider", tag = "1")]
    pub provider: i32,
    #[prost(string, tag = "2")]
    pub city: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ParcelLocker {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub code: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub address: String,
    #[prost(string, tag = "5")]
    pub city: String,
    #[prost(string, tag = "6")]
    pub zip_code: String,
    #[prost(double, tag = "7")]
    pub latitude: f64,
    #[prost(double, tag = "8")]
    pub longitude: f64,
    #[prost(bool, tag = "9")]
    pub available: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetParcelLockersResponse {
    #[prost(message, repeated, tag = "1")]
    pub parcel_lockers: Vec<ParcelLocker>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn message_encodes_and_decodes() {
        let req = CreateShipmentRequest {
            provider: DeliveryProvider::PostExpress as i32,
            from_address: Some(Address {
                city: "Belgrade".into(),
                country: "RS".into(),
                ..Address::default()
            }),
            packages: vec![Package {
                weight: "2.5".into(),
                ..Package::default()
            }],
            idempotency_key: "k-1".into(),
            ..CreateShipmentRequest::default()
        };
        let bytes = req.encode_to_vec();
        let decoded = CreateShipmentRequest::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, req);
        assert_eq!(decoded.provider(), DeliveryProvider::PostExpress);
    }

    #[test]
    fn unknown_enum_value_falls_back_to_default() {
        let shipment = Shipment {
            status: 42,
            ..Shipment::default()
        };
        assert_eq!(shipment.status(), ShipmentStatus::Unspecified);
    }
}
