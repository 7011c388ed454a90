//! Neurology calculators.

pub mod cpp;
pub mod trunk_impairment;
