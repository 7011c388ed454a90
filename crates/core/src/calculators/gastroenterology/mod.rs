//! Gastroenterology and hepatology calculators.

pub mod child_pugh;
pub mod maddrey;
