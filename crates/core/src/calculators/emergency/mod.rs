//! Emergency and critical care calculators.

pub mod covid_gram;
pub mod lrinec;
pub mod mess;
pub mod rule_of_nines;
