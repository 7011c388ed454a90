//! Oncology calculators.

pub mod gail;
pub mod leibovich;
