//! # Application Layer
//!
//! Use cases built on the domain model and the infrastructure ports.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
