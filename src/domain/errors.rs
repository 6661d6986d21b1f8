//! # Domain Errors
//!
//! Validation and arithmetic failures raised by domain types.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error raised when domain invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A weight was negative or above the allowed maximum.
    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    /// A dimension was negative.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Packaging type is not one of the supported tags.
    #[error("invalid packaging type: {0}")]
    InvalidPackagingType(String),

    /// A money amount was negative.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Request is missing required content.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A pricing rule is malformed.
    #[error("invalid pricing rule: {0}")]
    InvalidPricingRule(String),

    /// A shipment status change is not allowed by the lifecycle.
    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an invalid weight error.
    #[must_use]
    pub fn invalid_weight(message: impl Into<String>) -> Self {
        Self::InvalidWeight(message.into())
    }

    /// Creates an invalid dimensions error.
    #[must_use]
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions(message.into())
    }

    /// Returns true if this is an input validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Arithmetic(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_error_converts() {
        let err: DomainError = ArithmeticError::Overflow.into();
        assert!(!err.is_validation());
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn validation_errors_are_flagged() {
        assert!(DomainError::invalid_weight("negative").is_validation());
        assert!(
            DomainError::InvalidStatusTransition {
                from: "delivered".into(),
                to: "pending".into()
            }
            .to_string()
            .contains("delivered")
        );
    }
}
