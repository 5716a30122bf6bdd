//! # API Shared
//!
//! Shared definitions for the spots APIs.
//!
//! Contains:
//! - Wire types for JSON responses (`wire` module)
//! - OpenAPI schema types describing spot records
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `spots-cli` so both speak the same JSON shapes.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
