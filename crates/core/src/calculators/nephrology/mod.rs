//! Nephrology calculators.

pub mod free_water_deficit;
