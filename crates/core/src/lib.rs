//! # medscore Core
//!
//! Core logic for the medscore clinical calculator catalog.
//!
//! This crate contains the pure calculation pipeline:
//! - Input validation guards (`validation`)
//! - The table-driven scoring engine (`engine`)
//! - One module per calculator under `calculators`
//! - The catalog registry mapping score ids to their calculators (`registry`)
//!
//! **No API concerns**: HTTP routing, serialization of the transport layer,
//! and OpenAPI documentation belong in the `medscore-run` binary.

pub mod calculators;
pub mod engine;
pub mod error;
pub mod registry;
pub mod validation;

pub use error::{ScoreError, ScoreResult};
