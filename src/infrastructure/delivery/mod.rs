//! # Delivery Service Client
//!
//! Resilient client for the remote delivery microservice.
//!
//! ## Layers
//!
//! - [`DeliveryTransport`]: single-attempt port, one method per RPC
//! - [`GrpcDeliveryTransport`]: tonic implementation
//! - [`ResilientGateway`]: breaker gate, deadline, retries, breaker feedback
//!
//! ## Building Blocks
//!
//! - [`classify`]: retryable vs terminal
//! - [`BackoffPolicy`]: delay before each retry
//! - [`CircuitBreaker`]: per-destination failure gate
//! - [`conversions`]: domain records to and from wire messages

pub mod backoff;
pub mod circuit_breaker;
pub mod classifier;
pub mod conversions;
pub mod error;
pub mod gateway;
pub mod grpc_transport;
pub mod proto;
pub mod transport;

pub use backoff::BackoffPolicy;
pub use circuit_breaker::{
    Admission, CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerResult,
    CircuitState, Clock, TokioClock,
};
pub use classifier::{ErrorClass, classify, classify_code};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{
    BreakerRegistry, CallBudget, CallContext, GatewayConfig, Operation, OperationKind,
    ResilientGateway,
};
pub use grpc_transport::GrpcDeliveryTransport;
pub use transport::DeliveryTransport;
