//! Geriatrics calculators.

pub mod charlson;
pub mod gds15;
