//! # API Shared
//!
//! Shared wire types for the medscore APIs.
//!
//! Contains:
//! - The uniform calculation response and error body
//! - Catalog listing types
//! - Shared services like `HealthService`
//!
//! Used by the REST binary and by `medscore-core` for its return types.

pub mod health;
pub mod response;

pub use health::{HealthRes, HealthService};
pub use response::{ErrorBody, ScoreInfo, ScoreListRes, ScoreResponse};
