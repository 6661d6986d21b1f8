//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)           - validation and arithmetic failures
//! ├── Gateway(GatewayError)         - delivery microservice failures
//! ├── Repository(RepositoryError)   - persistence failures
//! └── Validation(String)            - request rejected before any remote call
//! ```
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("shipment is already delivered");
//! assert!(err.is_validation());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::delivery::GatewayError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Remote delivery service error.
    #[error("delivery service error: {0}")]
    Gateway(#[from] GatewayError),

    /// Persistence error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if retrying the whole operation later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(e) => e.is_service_unavailable(),
            _ => false,
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Repository(e) => e.is_not_found(),
            Self::Gateway(e) => e.code() == tonic::Code::NotFound,
            _ => false,
        }
    }

    /// Returns true if the request was rejected as invalid.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Domain(e) => e.is_validation(),
            _ => false,
        }
    }

    /// Returns true if the delivery service could not be reached.
    #[must_use]
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::Gateway(e) if e.is_service_unavailable())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn validation_errors() {
        assert!(ApplicationError::validation("bad").is_validation());
        let err: ApplicationError = DomainError::invalid_weight("negative").into();
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn not_found_from_every_layer() {
        let err: ApplicationError = RepositoryError::not_found("Provider", "p").into();
        assert!(err.is_not_found());

        let err: ApplicationError = GatewayError::rpc(Code::NotFound, "missing").into();
        assert!(err.is_not_found());
        assert!(!err.is_service_unavailable());
    }

    #[test]
    fn circuit_open_is_service_unavailable() {
        let err: ApplicationError = GatewayError::circuit_open("delivery:50052").into();
        assert!(err.is_service_unavailable());
        assert!(err.is_retryable());
        assert!(err.to_string().contains("delivery service error"));
    }
}
