//! Pulmonology calculators.

pub mod decaf;
pub mod winters;
