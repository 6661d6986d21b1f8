//! # Resilient Gateway
//!
//! Wraps every call to the delivery microservice in:
//!
//! 1. a circuit breaker gate (fail fast with `CircuitOpen`),
//! 2. one deadline covering all attempts of the call,
//! 3. a bounded retry loop with exponential backoff, retrying only errors
//!    the classifier marks retryable,
//! 4. breaker feedback from the final outcome.
//!
//! Cancelling the [`CallContext`] aborts an in-flight attempt or backoff
//! sleep at once with `GatewayError::Cancelled`; cancellation is not a
//! failure of the remote service and is not reported to the breaker.
//!
//! # Examples
//!
//! ```ignore
//! use delivery_gateway::infrastructure::delivery::{CallContext, ResilientGateway};
//!
//! let gateway = ResilientGateway::new(transport, breaker, GatewayConfig::default());
//! let shipment = gateway.get_shipment(&CallContext::new(), request).await?;
//! ```

use crate::infrastructure::delivery::backoff::BackoffPolicy;
use crate::infrastructure::delivery::circuit_breaker::{
    Admission, CircuitBreaker, CircuitBreakerConfig,
};
use crate::infrastructure::delivery::classifier::{ErrorClass, classify};
use crate::infrastructure::delivery::error::{GatewayError, GatewayResult};
use crate::infrastructure::delivery::proto;
use crate::infrastructure::delivery::transport::DeliveryTransport;
use dashmap::DashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default deadline for shipment lifecycle operations.
pub const DEFAULT_LIFECYCLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deadline for read-only lookups.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default attempts per call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Remote operations exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// CreateShipment.
    CreateShipment,
    /// GetShipment.
    GetShipment,
    /// TrackShipment.
    TrackShipment,
    /// CancelShipment.
    CancelShipment,
    /// CalculateRate.
    CalculateRate,
    /// GetSettlements.
    GetSettlements,
    /// GetStreets.
    GetStreets,
    /// GetParcelLockers.
    GetParcelLockers,
}

/// Budget class of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Shipment lifecycle calls.
    Lifecycle,
    /// Read-only reference data lookups.
    Lookup,
}

impl Operation {
    /// Human readable name used in errors and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateShipment => "create shipment",
            Self::GetShipment => "get shipment",
            Self::TrackShipment => "track shipment",
            Self::CancelShipment => "cancel shipment",
            Self::CalculateRate => "calculate rate",
            Self::GetSettlements => "get settlements",
            Self::GetStreets => "get streets",
            Self::GetParcelLockers => "get parcel lockers",
        }
    }

    /// Budget class.
    #[must_use]
    pub const fn kind(self) -> OperationKind {
        match self {
            Self::CreateShipment
            | Self::GetShipment
            | Self::TrackShipment
            | Self::CancelShipment => OperationKind::Lifecycle,
            Self::CalculateRate
            | Self::GetSettlements
            | Self::GetStreets
            | Self::GetParcelLockers => OperationKind::Lookup,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deadline and attempt budget for one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallBudget {
    /// Deadline covering every attempt.
    pub timeout: Duration,
    /// Maximum attempts, at least 1.
    pub max_attempts: u32,
}

/// Gateway configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatewayConfig {
    /// Budget for lifecycle operations.
    pub lifecycle: CallBudget,
    /// Budget for lookups.
    pub lookup: CallBudget,
    /// Delay between attempts.
    pub backoff: BackoffPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            lifecycle: CallBudget {
                timeout: DEFAULT_LIFECYCLE_TIMEOUT,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
            },
            lookup: CallBudget {
                timeout: DEFAULT_LOOKUP_TIMEOUT,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
            },
            backoff: BackoffPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Sets the lifecycle budget.
    #[must_use]
    pub fn with_lifecycle(mut self, timeout: Duration, max_attempts: u32) -> Self {
        self.lifecycle = CallBudget {
            timeout,
            max_attempts,
        };
        self
    }

    /// Sets the lookup budget.
    #[must_use]
    pub fn with_lookup(mut self, timeout: Duration, max_attempts: u32) -> Self {
        self.lookup = CallBudget {
            timeout,
            max_attempts,
        };
        self
    }

    /// Sets the backoff policy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Budget for an operation.
    #[must_use]
    pub fn budget(&self, operation: Operation) -> CallBudget {
        match operation.kind() {
            OperationKind::Lifecycle => self.lifecycle,
            OperationKind::Lookup => self.lookup,
        }
    }
}

/// Per-call context carrying cancellation.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
}

impl CallContext {
    /// Creates a context with a fresh token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context bound to an existing token.
    #[must_use]
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// The cancellation token.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancels the call.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true if cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Process-wide circuit breakers keyed by destination.
///
/// Gateways to the same destination obtain the same breaker.
#[derive(Debug, Default)]
pub struct BreakerRegistry {
    config: CircuitBreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            breakers: DashMap::new(),
        }
    }

    /// Breaker for `destination`, created on first use.
    #[must_use]
    pub fn breaker_for(&self, destination: &str) -> Arc<CircuitBreaker> {
        let entry = self
            .breakers
            .entry(destination.to_string())
            .or_insert_with(|| Arc::new(CircuitBreaker::new(destination, self.config)));
        Arc::clone(entry.value())
    }

    /// Number of known destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    /// Returns true if no breaker was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }
}

/// Delivery microservice client with deadlines, retries and a circuit breaker.
#[derive(Debug, Clone)]
pub struct ResilientGateway {
    transport: Arc<dyn DeliveryTransport>,
    breaker: Arc<CircuitBreaker>,
    config: GatewayConfig,
}

impl ResilientGateway {
    /// Creates a gateway.
    #[must_use]
    pub fn new(
        transport: Arc<dyn DeliveryTransport>,
        breaker: Arc<CircuitBreaker>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            transport,
            breaker,
            config,
        }
    }

    /// Creates a gateway whose breaker comes from `registry`.
    #[must_use]
    pub fn from_registry(
        transport: Arc<dyn DeliveryTransport>,
        registry: &BreakerRegistry,
        config: GatewayConfig,
    ) -> Self {
        let breaker = registry.breaker_for(transport.destination());
        Self::new(transport, breaker, config)
    }

    /// The breaker guarding this gateway's destination.
    #[must_use]
    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Creates a shipment.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn create_shipment(
        &self,
        ctx: &CallContext,
        request: proto::CreateShipmentRequest,
    ) -> GatewayResult<proto::CreateShipmentResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::CreateShipment, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.create_shipment(r).await }
        })
        .await
    }

    /// Fetches a shipment.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn get_shipment(
        &self,
        ctx: &CallContext,
        request: proto::GetShipmentRequest,
    ) -> GatewayResult<proto::GetShipmentResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::GetShipment, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.get_shipment(r).await }
        })
        .await
    }

    /// Tracks a shipment.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn track_shipment(
        &self,
        ctx: &CallContext,
        request: proto::TrackShipmentRequest,
    ) -> GatewayResult<proto::TrackShipmentResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::TrackShipment, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.track_shipment(r).await }
        })
        .await
    }

    /// Cancels a shipment.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn cancel_shipment(
        &self,
        ctx: &CallContext,
        request: proto::CancelShipmentRequest,
    ) -> GatewayResult<proto::CancelShipmentResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::CancelShipment, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.cancel_shipment(r).await }
        })
        .await
    }

    /// Asks the courier for a rate.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn calculate_rate(
        &self,
        ctx: &CallContext,
        request: proto::CalculateRateRequest,
    ) -> GatewayResult<proto::CalculateRateResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::CalculateRate, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.calculate_rate(r).await }
        })
        .await
    }

    /// Searches settlements.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn get_settlements(
        &self,
        ctx: &CallContext,
        request: proto::GetSettlementsRequest,
    ) -> GatewayResult<proto::GetSettlementsResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::GetSettlements, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.get_settlements(r).await }
        })
        .await
    }

    /// Searches streets.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn get_streets(
        &self,
        ctx: &CallContext,
        request: proto::GetStreetsRequest,
    ) -> GatewayResult<proto::GetStreetsResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::GetStreets, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.get_streets(r).await }
        })
        .await
    }

    /// Lists parcel lockers.
    ///
    /// # Errors
    ///
    /// See [`ResilientGateway::execute`].
    pub async fn get_parcel_lockers(
        &self,
        ctx: &CallContext,
        request: proto::GetParcelLockersRequest,
    ) -> GatewayResult<proto::GetParcelLockersResponse> {
        let transport = Arc::clone(&self.transport);
        self.execute(ctx, Operation::GetParcelLockers, request, move |r| {
            let t = Arc::clone(&transport);
            async move { t.get_parcel_lockers(r).await }
        })
        .await
    }

    /// Runs `call` under the breaker, deadline and retry policy.
    ///
    /// # Errors
    ///
    /// - `CircuitOpen` if the breaker rejects the call; nothing is sent
    /// - the remote error unchanged if it is terminal
    /// - `RetriesExhausted` wrapping the last error once attempts or the
    ///   deadline run out
    /// - `Cancelled` if `ctx` is cancelled
    pub async fn execute<Req, Resp, F, Fut>(
        &self,
        ctx: &CallContext,
        operation: Operation,
        request: Req,
        call: F,
    ) -> GatewayResult<Resp>
    where
        Req: Clone + Send,
        F: Fn(Req) -> Fut + Send + Sync,
        Fut: Future<Output = GatewayResult<Resp>> + Send,
    {
        if ctx.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }
        let admission = match self.breaker.try_acquire() {
            Ok(admission) => admission,
            Err(err) => {
                debug!(operation = %operation, error = %err, "call rejected by circuit breaker");
                return Err(GatewayError::circuit_open(self.breaker.name()));
            }
        };
        if admission == Admission::Probe {
            debug!(operation = %operation, "sending half-open probe");
        }

        let result = self.run_attempts(ctx, operation, request, call).await;
        if admission == Admission::Probe && matches!(result, Err(GatewayError::Cancelled)) {
            self.breaker.release_probe();
        }
        result
    }

    async fn run_attempts<Req, Resp, F, Fut>(
        &self,
        ctx: &CallContext,
        operation: Operation,
        request: Req,
        call: F,
    ) -> GatewayResult<Resp>
    where
        Req: Clone + Send,
        F: Fn(Req) -> Fut + Send + Sync,
        Fut: Future<Output = GatewayResult<Resp>> + Send,
    {
        let budget = self.config.budget(operation);
        let max_attempts = budget.max_attempts.max(1);
        let deadline = Instant::now() + budget.timeout;
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < max_attempts {
            if attempts > 0 {
                let wake = (Instant::now() + self.config.backoff.delay(attempts)).min(deadline);
                tokio::select! {
                    biased;
                    () = ctx.cancel.cancelled() => return Err(GatewayError::Cancelled),
                    () = tokio::time::sleep_until(wake) => {}
                }
            }
            if Instant::now() >= deadline {
                break;
            }
            attempts += 1;

            let outcome = tokio::select! {
                biased;
                () = ctx.cancel.cancelled() => return Err(GatewayError::Cancelled),
                r = tokio::time::timeout_at(deadline, call(request.clone())) => r,
            };

            let error = match outcome {
                Ok(Ok(response)) => {
                    self.breaker.record_success();
                    return Ok(response);
                }
                Ok(Err(error)) => error,
                Err(_elapsed) => GatewayError::deadline_exceeded(operation.name()),
            };

            match classify(&error) {
                ErrorClass::Terminal => {
                    self.breaker.record_failure();
                    return Err(error);
                }
                ErrorClass::Retryable => {
                    warn!(
                        operation = %operation,
                        attempt = attempts,
                        max_attempts,
                        error = %error,
                        "retryable delivery service error"
                    );
                    last_error = Some(error);
                }
            }
        }

        self.breaker.record_failure();
        let last = last_error.unwrap_or_else(|| GatewayError::deadline_exceeded(operation.name()));
        Err(GatewayError::RetriesExhausted {
            operation: operation.name(),
            attempts,
            last: Box::new(last),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::delivery::circuit_breaker::{CircuitState, DEFAULT_COOL_DOWN};
    use std::sync::atomic::{AtomicU32, Ordering};
    use tonic::Code;

    fn gateway(breaker: Arc<CircuitBreaker>) -> ResilientGateway {
        // Transport is unused; calls go through `execute` directly.
        let transport: Arc<dyn DeliveryTransport> = Arc::new(
            crate::infrastructure::delivery::grpc_transport::GrpcDeliveryTransport::from_channel(
                tonic::transport::Endpoint::from_static("http://127.0.0.1:1").connect_lazy(),
                "test",
            ),
        );
        ResilientGateway::new(transport, breaker, GatewayConfig::default())
    }

    fn breaker() -> Arc<CircuitBreaker> {
        Arc::new(CircuitBreaker::new("test", CircuitBreakerConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let gw = gateway(breaker());
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let started = Instant::now();

        let result = gw
            .execute(&CallContext::new(), Operation::CreateShipment, (), move |()| {
                let n = c.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(GatewayError::rpc(Code::Unavailable, "down"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 100 ms + 200 ms of backoff.
        assert_eq!(started.elapsed(), Duration::from_millis(300));
        assert_eq!(gw.breaker().consecutive_failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_error_is_not_retried() {
        let gw = gateway(breaker());
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let err = gw
            .execute(&CallContext::new(), Operation::GetShipment, (), move |()| {
                c.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(GatewayError::rpc(Code::NotFound, "missing")) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Rpc { code: Code::NotFound, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(gw.breaker().consecutive_failures(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_wraps_last_error() {
        let gw = gateway(breaker());
        let err = gw
            .execute(&CallContext::new(), Operation::TrackShipment, (), |()| async {
                Err::<(), _>(GatewayError::rpc(Code::ResourceExhausted, "busy"))
            })
            .await
            .unwrap_err();

        match err {
            GatewayError::RetriesExhausted {
                operation,
                attempts,
                last,
            } => {
                assert_eq!(operation, "track shipment");
                assert_eq!(attempts, 3);
                assert_eq!(last.code(), Code::ResourceExhausted);
            }
            other => unreachable!("unexpected error {other:?}"),
        }
        assert_eq!(gw.breaker().consecutive_failures(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_attempt_hits_shared_deadline() {
        let gw = gateway(breaker());
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let err = gw
            .execute(&CallContext::new(), Operation::GetStreets, (), move |()| {
                c.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                }
            })
            .await
            .unwrap_err();

        // The first attempt consumes the whole 10 s lookup deadline.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match err {
            GatewayError::RetriesExhausted { last, .. } => {
                assert_eq!(last.code(), Code::DeadlineExceeded);
            }
            other => unreachable!("unexpected error {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn open_breaker_rejects_without_calling() {
        let b = breaker();
        for _ in 0..5 {
            b.record_failure();
        }
        let gw = gateway(b);
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let err = gw
            .execute(&CallContext::new(), Operation::CreateShipment, (), move |()| {
                c.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::CircuitOpen { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_backoff_skips_breaker() {
        let gw = gateway(breaker());
        let ctx = CallContext::new();
        let cancel = ctx.clone();
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let handle = tokio::spawn({
            let gw = gw.clone();
            async move {
                gw.execute(&ctx, Operation::CreateShipment, (), move |()| {
                    c.fetch_add(1, Ordering::SeqCst);
                    async { Err::<(), _>(GatewayError::transport("refused")) }
                })
                .await
            }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        let err = handle.await.unwrap().unwrap_err();

        assert!(matches!(err, GatewayError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(gw.breaker().consecutive_failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_never_sleeps_past_the_deadline() {
        let gw = gateway(breaker());
        let started = Instant::now();

        let err = gw
            .execute(&CallContext::new(), Operation::GetStreets, (), |()| async {
                tokio::time::sleep(Duration::from_millis(9_950)).await;
                Err::<(), _>(GatewayError::rpc(Code::Unavailable, "down"))
            })
            .await
            .unwrap_err();

        // 100 ms of backoff would end 50 ms after the 10 s lookup deadline.
        assert!(matches!(err, GatewayError::RetriesExhausted { attempts: 1, .. }));
        assert_eq!(started.elapsed(), DEFAULT_LOOKUP_TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn probe_cancelled_in_flight_frees_the_slot() {
        let b = breaker();
        for _ in 0..5 {
            b.record_failure();
        }
        tokio::time::advance(DEFAULT_COOL_DOWN).await;
        let gw = gateway(Arc::clone(&b));
        let ctx = CallContext::new();
        let cancel = ctx.clone();

        let handle = tokio::spawn({
            let gw = gw.clone();
            async move {
                gw.execute(&ctx, Operation::TrackShipment, (), |()| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                })
                .await
            }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(b.state(), CircuitState::HalfOpen);
        cancel.cancel();
        let err = handle.await.unwrap().unwrap_err();

        assert!(matches!(err, GatewayError::Cancelled));
        assert_eq!(b.state(), CircuitState::Open);
        assert_eq!(b.try_acquire().unwrap(), Admission::Probe);
    }

    #[test]
    fn lookups_use_lookup_budget() {
        let config = GatewayConfig::default();
        assert_eq!(
            config.budget(Operation::GetParcelLockers).timeout,
            DEFAULT_LOOKUP_TIMEOUT
        );
        assert_eq!(
            config.budget(Operation::CancelShipment).timeout,
            DEFAULT_LIFECYCLE_TIMEOUT
        );
    }

    #[test]
    fn registry_shares_breakers_per_destination() {
        let registry = BreakerRegistry::new(CircuitBreakerConfig::default());
        let a = registry.breaker_for("svc-a");
        let again = registry.breaker_for("svc-a");
        let b = registry.breaker_for("svc-b");
        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }
}
