//! # gRPC Transport
//!
//! [`DeliveryTransport`] over a tonic [`Channel`].
//!
//! The channel is created lazily, so constructing the transport never blocks
//! and never fails because the service is down; connection problems surface
//! per call as retryable transport errors.

use crate::infrastructure::delivery::error::{GatewayError, GatewayResult};
use crate::infrastructure::delivery::proto::{self, paths};
use crate::infrastructure::delivery::transport::DeliveryTransport;
use async_trait::async_trait;
use std::time::Duration;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

/// tonic client for the delivery microservice.
#[derive(Debug, Clone)]
pub struct GrpcDeliveryTransport {
    channel: Channel,
    destination: String,
}

impl GrpcDeliveryTransport {
    /// Creates a transport for `endpoint` (e.g. `http://delivery:50052`).
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the endpoint URI is invalid.
    pub fn connect_lazy(endpoint: &str, connect_timeout: Duration) -> GatewayResult<Self> {
        let channel = Endpoint::from_shared(endpoint.to_string())
            .map_err(|e| GatewayError::transport(format!("invalid endpoint '{endpoint}': {e}")))?
            .connect_timeout(connect_timeout)
            .connect_lazy();
        Ok(Self {
            channel,
            destination: endpoint.to_string(),
        })
    }

    /// Wraps an existing channel.
    #[must_use]
    pub fn from_channel(channel: Channel, destination: impl Into<String>) -> Self {
        Self {
            channel,
            destination: destination.into(),
        }
    }

    async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> GatewayResult<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| GatewayError::transport(format!("service was not ready: {e}")))?;

        debug!(destination = %self.destination, path, "sending rpc");
        let codec = tonic_prost::ProstCodec::default();
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl DeliveryTransport for GrpcDeliveryTransport {
    fn destination(&self) -> &str {
        &self.destination
    }

    async fn create_shipment(
        &self,
        request: proto::CreateShipmentRequest,
    ) -> GatewayResult<proto::CreateShipmentResponse> {
        self.unary(paths::CREATE_SHIPMENT, request).await
    }

    async fn get_shipment(
        &self,
        request: proto::GetShipmentRequest,
    ) -> GatewayResult<proto::GetShipmentResponse> {
        self.unary(paths::GET_SHIPMENT, request).await
    }

    async fn track_shipment(
        &self,
        request: proto::TrackShipmentRequest,
    ) -> GatewayResult<proto::TrackShipmentResponse> {
        self.unary(paths::TRACK_SHIPMENT, request).await
    }

    async fn cancel_shipment(
        &self,
        request: proto::CancelShipmentRequest,
    ) -> GatewayResult<proto::CancelShipmentResponse> {
        self.unary(paths::CANCEL_SHIPMENT, request).await
    }

    async fn calculate_rate(
        &self,
        request: proto::CalculateRateRequest,
    ) -> GatewayResult<proto::CalculateRateResponse> {
        self.unary(paths::CALCULATE_RATE, request).await
    }

    async fn get_settlements(
        &self,
        request: proto::GetSettlementsRequest,
    ) -> GatewayResult<proto::GetSettlementsResponse> {
        self.unary(paths::GET_SETTLEMENTS, request).await
    }

    async fn get_streets(
        &self,
        request: proto::GetStreetsRequest,
    ) -> GatewayResult<proto::GetStreetsResponse> {
        self.unary(paths::GET_STREETS, request).await
    }

    async fn get_parcel_lockers(
        &self,
        request: proto::GetParcelLockersRequest,
    ) -> GatewayResult<proto::GetParcelLockersResponse> {
        self.unary(paths::GET_PARCEL_LOCKERS, request).await
    }
}
