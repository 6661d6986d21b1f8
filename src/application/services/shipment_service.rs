//! # Shipment Service
//!
//! Shipment lifecycle and reference lookups on top of the
//! [`ResilientGateway`], with a local mirror of every shipment created.
//!
//! # Mirror
//!
//! The mirror maps tracking numbers to marketplace orders and keeps the last
//! known status and tracking history. Tracking falls back to it, flagged
//! stale, when the delivery service is unreachable.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{
    ParcelLocker, ParcelLockerQuery, RateEstimate, RateRequest, Settlement, SettlementQuery,
    Shipment, ShipmentRecord, ShipmentRequest, Street, StreetQuery, TrackingEvent, TrackingInfo,
};
use crate::domain::value_objects::{ExternalShipmentId, OrderId, ShipmentStatus};
use crate::infrastructure::delivery::conversions::required_shipment;
use crate::infrastructure::delivery::{CallContext, GatewayResult, ResilientGateway, proto};
use crate::infrastructure::persistence::traits::ShipmentRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Application service for remote shipments.
#[derive(Debug, Clone)]
pub struct ShipmentService {
    gateway: ResilientGateway,
    shipments: Arc<dyn ShipmentRepository>,
}

impl ShipmentService {
    /// Creates a new service.
    #[must_use]
    pub fn new(gateway: ResilientGateway, shipments: Arc<dyn ShipmentRepository>) -> Self {
        Self { gateway, shipments }
    }

    /// The gateway in use.
    #[must_use]
    pub fn gateway(&self) -> &ResilientGateway {
        &self.gateway
    }

    /// Creates a shipment and mirrors it locally.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Domain` if the request is invalid; nothing is sent
    /// - `ApplicationError::Gateway` if the remote call fails
    /// - `ApplicationError::Repository` if the mirror cannot be written
    pub async fn create_shipment(
        &self,
        ctx: &CallContext,
        request: &ShipmentRequest,
    ) -> ApplicationResult<Shipment> {
        request.validate()?;

        let response = self
            .gateway
            .create_shipment(ctx, proto::CreateShipmentRequest::from(request))
            .await?;
        let shipment = required_shipment(response.shipment)?;

        let record = ShipmentRecord::new(request.order_id.clone(), shipment.clone());
        self.shipments.save(&record).await?;

        info!(
            order_id = %request.order_id,
            shipment_id = %shipment.id,
            tracking_number = %shipment.tracking_number,
            provider = %shipment.provider,
            "shipment created"
        );
        Ok(shipment)
    }

    /// Fetches a shipment and refreshes its mirror.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Gateway` if the remote call fails.
    pub async fn get_shipment(
        &self,
        ctx: &CallContext,
        id: &ExternalShipmentId,
    ) -> ApplicationResult<Shipment> {
        let response = self
            .gateway
            .get_shipment(
                ctx,
                proto::GetShipmentRequest {
                    id: id.to_string(),
                },
            )
            .await?;
        let shipment = required_shipment(response.shipment)?;

        if let Some(mut record) = self.shipments.get_by_external_id(id).await? {
            record.refresh(shipment.clone());
            self.shipments.save(&record).await?;
        }
        Ok(shipment)
    }

    /// Tracks a shipment.
    ///
    /// When the delivery service is unavailable (circuit open or retries
    /// exhausted) and the shipment is mirrored, the last known status and
    /// events are returned with `stale` set.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Gateway` for terminal remote errors, or when the
    ///   service is unavailable and nothing is mirrored
    pub async fn track_shipment(
        &self,
        ctx: &CallContext,
        tracking_number: &str,
    ) -> ApplicationResult<TrackingInfo> {
        let request = proto::TrackShipmentRequest {
            tracking_number: tracking_number.to_string(),
        };
        let response = match self.gateway.track_shipment(ctx, request).await {
            Ok(response) => response,
            Err(e) if e.is_service_unavailable() => {
                return match self.shipments.get_by_tracking_number(tracking_number).await? {
                    Some(record) => {
                        warn!(
                            tracking_number,
                            error = %e,
                            "delivery service unavailable, serving mirrored tracking"
                        );
                        Ok(record.to_stale_tracking())
                    }
                    None => Err(e.into()),
                };
            }
            Err(e) => return Err(e.into()),
        };

        let events = response
            .events
            .into_iter()
            .map(TrackingEvent::try_from)
            .collect::<GatewayResult<Vec<_>>>()?;
        let shipment = response.shipment.map(Shipment::try_from).transpose()?;

        let mirrored = self.shipments.get_by_tracking_number(tracking_number).await?;
        let status = shipment
            .as_ref()
            .map(|s| s.status)
            .or_else(|| events.last().map(|e| e.status))
            .or_else(|| mirrored.as_ref().map(ShipmentRecord::status))
            .unwrap_or_default();

        match mirrored {
            Some(mut record) => {
                match shipment {
                    Some(shipment) => record.refresh(shipment),
                    None => {
                        if let Err(e) = record.apply_status(status) {
                            warn!(tracking_number, error = %e, "ignoring remote status");
                        }
                    }
                }
                let new_events = record.merge_events(events);
                self.shipments.save(&record).await?;
                info!(tracking_number, status = %record.status(), new_events, "tracking synced");
                Ok(TrackingInfo {
                    tracking_number: tracking_number.to_string(),
                    status: record.status(),
                    events: record.events,
                    stale: false,
                })
            }
            None => Ok(TrackingInfo {
                tracking_number: tracking_number.to_string(),
                status,
                events,
                stale: false,
            }),
        }
    }

    /// Cancels a shipment.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Validation` if the mirror shows the shipment
    ///   delivered or already cancelled; nothing is sent
    /// - `ApplicationError::Gateway` if the remote call fails
    pub async fn cancel_shipment(
        &self,
        ctx: &CallContext,
        id: &ExternalShipmentId,
        reason: &str,
    ) -> ApplicationResult<Shipment> {
        let mirrored = self.shipments.get_by_external_id(id).await?;
        if let Some(record) = &mirrored {
            if matches!(
                record.status(),
                ShipmentStatus::Delivered | ShipmentStatus::Cancelled
            ) {
                return Err(ApplicationError::validation(format!(
                    "shipment {id} cannot be cancelled: it is {}",
                    record.status()
                )));
            }
        }

        let response = self
            .gateway
            .cancel_shipment(
                ctx,
                proto::CancelShipmentRequest {
                    id: id.to_string(),
                    reason: reason.to_string(),
                },
            )
            .await?;
        let shipment = required_shipment(response.shipment)?;

        if let Some(mut record) = mirrored {
            record.refresh(shipment.clone());
            if let Err(e) = record.apply_status(ShipmentStatus::Cancelled) {
                warn!(shipment_id = %id, error = %e, "mirror not marked cancelled");
            }
            self.shipments.save(&record).await?;
        }

        info!(shipment_id = %id, reason, "shipment cancelled");
        Ok(shipment)
    }

    /// Mirrored shipments of an order.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if the mirror cannot be read.
    pub async fn shipments_for_order(
        &self,
        order_id: &OrderId,
    ) -> ApplicationResult<Vec<ShipmentRecord>> {
        Ok(self.shipments.find_by_order(order_id).await?)
    }

    /// Asks the courier for a rate.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Gateway` if the remote call fails.
    pub async fn calculate_rate(
        &self,
        ctx: &CallContext,
        request: &RateRequest,
    ) -> ApplicationResult<RateEstimate> {
        let response = self
            .gateway
            .calculate_rate(ctx, proto::CalculateRateRequest::from(request))
            .await?;
        Ok(RateEstimate::try_from(response)?)
    }

    /// Searches settlements.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Gateway` if the remote call fails.
    pub async fn get_settlements(
        &self,
        ctx: &CallContext,
        query: &SettlementQuery,
    ) -> ApplicationResult<Vec<Settlement>> {
        let response = self
            .gateway
            .get_settlements(ctx, proto::GetSettlementsRequest::from(query))
            .await?;
        Ok(response.settlements.into_iter().map(Settlement::from).collect())
    }

    /// Searches streets of a settlement.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Gateway` if the remote call fails.
    pub async fn get_streets(
        &self,
        ctx: &CallContext,
        query: &StreetQuery,
    ) -> ApplicationResult<Vec<Street>> {
        let response = self
            .gateway
            .get_streets(ctx, proto::GetStreetsRequest::from(query))
            .await?;
        Ok(response.streets.into_iter().map(Street::from).collect())
    }

    /// Lists parcel lockers in a city.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Gateway` if the remote call fails.
    pub async fn get_parcel_lockers(
        &self,
        ctx: &CallContext,
        query: &ParcelLockerQuery,
    ) -> ApplicationResult<Vec<ParcelLocker>> {
        let response = self
            .gateway
            .get_parcel_lockers(ctx, proto::GetParcelLockersRequest::from(query))
            .await?;
        Ok(response
            .parcel_lockers
            .into_iter()
            .map(ParcelLocker::from)
            .collect())
    }
}
