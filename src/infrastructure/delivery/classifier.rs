//! # Error Classifier
//!
//! Decides whether a failed call may be retried.
//!
//! Classification is total: every [`GatewayError`] and every gRPC code maps to
//! exactly one [`ErrorClass`]. Anything that did not come with a definitive
//! status from the remote side is treated as transient.

use crate::infrastructure::delivery::error::GatewayError;
use tonic::Code;

/// Retry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Transient; the same request may succeed later.
    Retryable,
    /// Definitive; retrying cannot help.
    Terminal,
}

/// Classifies a gRPC status code.
#[must_use]
pub const fn classify_code(code: Code) -> ErrorClass {
    match code {
        Code::Unavailable
        | Code::DeadlineExceeded
        | Code::ResourceExhausted
        | Code::Aborted
        | Code::Cancelled
        | Code::Unknown => ErrorClass::Retryable,
        Code::Ok
        | Code::InvalidArgument
        | Code::NotFound
        | Code::AlreadyExists
        | Code::PermissionDenied
        | Code::Unauthenticated
        | Code::FailedPrecondition
        | Code::OutOfRange
        | Code::Unimplemented
        | Code::Internal
        | Code::DataLoss => ErrorClass::Terminal,
    }
}

/// Classifies a gateway error.
///
/// Locally produced outcomes (open breaker, caller cancellation, exhausted
/// retries, unmappable responses) are terminal for the retry loop.
#[must_use]
pub fn classify(error: &GatewayError) -> ErrorClass {
    match error {
        GatewayError::Rpc { code, .. } => classify_code(*code),
        GatewayError::Transport { .. } => ErrorClass::Retryable,
        GatewayError::CircuitOpen { .. }
        | GatewayError::RetriesExhausted { .. }
        | GatewayError::Cancelled
        | GatewayError::InvalidResponse { .. } => ErrorClass::Terminal,
    }
}
