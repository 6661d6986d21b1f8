//! # Domain Layer
//!
//! Delivery domain model: value objects, entities and domain errors.
//!
//! Nothing in this layer performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
