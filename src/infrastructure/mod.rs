//! # Infrastructure Layer
//!
//! Adapters for the remote delivery microservice and persistence.
//!
//! - [`delivery`]: resilient gRPC client
//! - [`persistence`]: repository ports and in-memory implementations

pub mod delivery;
pub mod persistence;
