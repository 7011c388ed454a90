//! Hematology calculators.

pub mod rpi;
pub mod wpss;
