//! Cardiology calculators.

pub mod cha2ds2_va;
pub mod chads2;
pub mod killip;
pub mod ldl_calculated;
pub mod maggic;
