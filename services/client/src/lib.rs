//! services/client/src/lib.rs
//!
//! Wiring around the cocktail logic layer: configuration, the HTTP adapters
//! for the two remote services, and the service-level error type.

pub mod adapters;
pub mod config;
pub mod error;
