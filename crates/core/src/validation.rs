//! Input validation utilities.
//!
//! This module contains the guards every calculator applies to its numeric
//! inputs before any scoring. Values outside the stated range are rejected,
//! never clamped.

use crate::{ScoreError, ScoreResult};

/// Validates that a floating-point input lies within `[min, max]`.
///
/// `unit` is appended to the allowed-range message when non-empty, so the
/// error spells out both the bounds and their unit.
///
/// # Errors
///
/// Returns `ScoreError::OutOfRange` naming the field and the allowed range.
pub fn require_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    unit: &str,
) -> ScoreResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ScoreError::OutOfRange {
            field,
            allowed: allowed_range(min, max, unit),
        });
    }
    Ok(())
}

/// Validates that an integer input lies within `[min, max]`.
///
/// # Errors
///
/// Returns `ScoreError::OutOfRange` naming the field and the allowed range.
pub fn require_int_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
    unit: &str,
) -> ScoreResult<()> {
    if value < min || value > max {
        return Err(ScoreError::OutOfRange {
            field,
            allowed: allowed_range(min as f64, max as f64, unit),
        });
    }
    Ok(())
}

fn allowed_range(min: f64, max: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{} to {}", min, max)
    } else {
        format!("{} to {} {}", min, max, unit)
    }
}
