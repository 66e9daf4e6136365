//! # API Shared
//!
//! Shared request/response types for the CureCast APIs.
//!
//! Contains:
//! - JSON wire types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Field names follow the JSON contract the web client already consumes
//! (`Disease`, `Percent`, `Sample_Count`, ...), not Rust naming.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
