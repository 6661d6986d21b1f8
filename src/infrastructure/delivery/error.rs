//! # Gateway Errors
//!
//! Error type for calls to the delivery microservice.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::infrastructure::delivery::error::GatewayError;
//! use tonic::Code;
//!
//! let error = GatewayError::rpc(Code::Unavailable, "connection reset");
//! assert!(error.is_retryable());
//!
//! let error = GatewayError::rpc(Code::InvalidArgument, "weight missing");
//! assert!(!error.is_retryable());
//! ```

use crate::infrastructure::delivery::classifier::{ErrorClass, classify};
use thiserror::Error;
use tonic::Code;

/// Error type for delivery gateway operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The circuit breaker for the destination is open; nothing was sent.
    #[error("service unavailable: circuit breaker open for {destination}")]
    CircuitOpen {
        /// Destination the breaker protects.
        destination: String,
    },

    /// The remote service answered with a non-OK gRPC status.
    #[error("rpc error ({code:?}): {message}")]
    Rpc {
        /// gRPC status code.
        code: Code,
        /// Status message.
        message: String,
    },

    /// The call failed below the gRPC layer (connect, channel not ready).
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// Every allowed attempt failed with a retryable error.
    #[error("failed to {operation} after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Operation name.
        operation: &'static str,
        /// Attempts made.
        attempts: u32,
        /// Error of the final attempt.
        #[source]
        last: Box<GatewayError>,
    },

    /// The caller cancelled the call.
    #[error("call cancelled")]
    Cancelled,

    /// The response could not be mapped into the domain model.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl GatewayError {
    /// Creates a circuit-open error.
    #[must_use]
    pub fn circuit_open(destination: impl Into<String>) -> Self {
        Self::CircuitOpen {
            destination: destination.into(),
        }
    }

    /// Creates an RPC status error.
    #[must_use]
    pub fn rpc(code: Code, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates the error used when an attempt overruns the call deadline.
    #[must_use]
    pub fn deadline_exceeded(operation: &str) -> Self {
        Self::rpc(
            Code::DeadlineExceeded,
            format!("{operation} exceeded its deadline"),
        )
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Returns true if the gateway retries this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        classify(self) == ErrorClass::Retryable
    }

    /// Returns true if the remote service could not be reached or kept
    /// failing, as opposed to answering with a definitive error.
    #[must_use]
    pub fn is_service_unavailable(&self) -> bool {
        matches!(
            self,
            Self::CircuitOpen { .. } | Self::RetriesExhausted { .. } | Self::Transport { .. }
        )
    }

    /// gRPC status code that best describes the error.
    #[must_use]
    pub fn code(&self) -> Code {
        match self {
            Self::CircuitOpen { .. } | Self::Transport { .. } => Code::Unavailable,
            Self::Rpc { code, .. } => *code,
            Self::RetriesExhausted { last, .. } => last.code(),
            Self::Cancelled => Code::Cancelled,
            Self::InvalidResponse { .. } => Code::Internal,
        }
    }
}

impl From<tonic::Status> for GatewayError {
    fn from(status: tonic::Status) -> Self {
        Self::rpc(status.code(), status.message())
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_retryable() {
        let error = GatewayError::rpc(Code::Unavailable, "down");
        assert!(error.is_retryable());
        assert!(!error.is_service_unavailable());
    }

    #[test]
    fn not_found_is_terminal() {
        let error: GatewayError = tonic::Status::not_found("shipment not found").into();
        assert!(!error.is_retryable());
        assert_eq!(error.code(), Code::NotFound);
    }

    #[test]
    fn circuit_open_reports_unavailable() {
        let error = GatewayError::circuit_open("delivery-service");
        assert!(error.is_service_unavailable());
        assert_eq!(error.code(), Code::Unavailable);
        assert!(error.to_string().contains("service unavailable"));
    }

    #[test]
    fn exhausted_wraps_last_error() {
        let error = GatewayError::RetriesExhausted {
            operation: "create shipment",
            attempts: 3,
            last: Box::new(GatewayError::rpc(Code::ResourceExhausted, "slow down")),
        };
        assert_eq!(error.code(), Code::ResourceExhausted);
        assert!(error.is_service_unavailable());
        let display = error.to_string();
        assert!(display.contains("after 3 attempts"));
        assert!(display.contains("slow down"));
    }

    #[test]
    fn deadline_error_is_retryable() {
        let error = GatewayError::deadline_exceeded("track shipment");
        assert_eq!(error.code(), Code::DeadlineExceeded);
        assert!(error.is_retryable());
    }
}
