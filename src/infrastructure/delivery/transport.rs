//! # Delivery Transport
//!
//! Port to the delivery microservice.
//!
//! One method per RPC, taking and returning [`proto`](super::proto) messages.
//! Implementations perform a single attempt; deadlines, retries and the
//! circuit breaker live in [`ResilientGateway`](super::gateway::ResilientGateway).

use crate::infrastructure::delivery::error::GatewayResult;
use crate::infrastructure::delivery::proto;
use async_trait::async_trait;
use std::fmt::Debug;

/// Single-attempt client for `delivery.v1.DeliveryService`.
#[async_trait]
pub trait DeliveryTransport: Send + Sync + Debug {
    /// Destination identifier; one circuit breaker exists per destination.
    fn destination(&self) -> &str;

    /// Creates a shipment.
    async fn create_shipment(
        &self,
        request: proto::CreateShipmentRequest,
    ) -> GatewayResult<proto::CreateShipmentResponse>;

    /// Fetches a shipment by remote id.
    async fn get_shipment(
        &self,
        request: proto::GetShipmentRequest,
    ) -> GatewayResult<proto::GetShipmentResponse>;

    /// Fetches tracking status and events.
    async fn track_shipment(
        &self,
        request: proto::TrackShipmentRequest,
    ) -> GatewayResult<proto::TrackShipmentResponse>;

    /// Cancels a shipment.
    async fn cancel_shipment(
        &self,
        request: proto::CancelShipmentRequest,
    ) -> GatewayResult<proto::CancelShipmentResponse>;

    /// Asks the courier for a rate.
    async fn calculate_rate(
        &self,
        request: proto::CalculateRateRequest,
    ) -> GatewayResult<proto::CalculateRateResponse>;

    /// Searches settlements.
    async fn get_settlements(
        &self,
        request: proto::GetSettlementsRequest,
    ) -> GatewayResult<proto::GetSettlementsResponse>;

    /// Searches streets.
    async fn get_streets(
        &self,
        request: proto::GetStreetsRequest,
    ) -> GatewayResult<proto::GetStreetsResponse>;

    /// Lists parcel lockers.
    async fn get_parcel_lockers(
        &self,
        request: proto::GetParcelLockersRequest,
    ) -> GatewayResult<proto::GetParcelLockersResponse>;
}
