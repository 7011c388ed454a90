//! Table-driven scoring engine.
//!
//! Calculators express their published threshold tables as ordered [`Band`]
//! lists rather than chains of comparisons, so the boundary convention of
//! each source publication (strict `<` versus inclusive `<=`) is visible in
//! the data. Interpretation buckets use the same mechanism with a
//! [`Stage`] payload. Items whose points only count when another item
//! scored are expressed as [`GatedItem`] lists.

/// One row of an ordered threshold table: matches values below `upper`
/// (inclusively when `inclusive` is set) and yields `value`.
///
/// Tables are scanned first-match-wins and must end with a catch-all row
/// (`upper = f64::INFINITY`).
#[derive(Debug, Clone, Copy)]
pub struct Band<T> {
    pub upper: f64,
    pub inclusive: bool,
    pub value: T,
}

/// Band matching `x <= upper`.
pub const fn le<T>(upper: f64, value: T) -> Band<T> {
    Band {
        upper,
        inclusive: true,
        value,
    }
}

/// Band matching `x < upper`.
pub const fn lt<T>(upper: f64, value: T) -> Band<T> {
    Band {
        upper,
        inclusive: false,
        value,
    }
}

/// Catch-all band, required as the last row of every table.
pub const fn rest<T>(value: T) -> Band<T> {
    Band {
        upper: f64::INFINITY,
        inclusive: true,
        value,
    }
}

/// Picks the first matching band for `x`.
///
/// Tables end with a [`rest`] row, so a finite `x` always matches; the last
/// row is returned as a fallback for completeness.
pub fn pick<T>(x: f64, bands: &[Band<T>]) -> &T {
    for band in bands {
        if x < band.upper || (band.inclusive && x == band.upper) {
            return &band.value;
        }
    }
    &bands[bands.len() - 1].value
}

/// Interpretation bucket: a canonical label plus its one-line description.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub stage: &'static str,
    pub description: &'static str,
}

pub const fn stage(stage: &'static str, description: &'static str) -> Stage {
    Stage { stage, description }
}

/// One item of a gated sum: its earned points and, optionally, the index of
/// an earlier item that must itself have earned points for this one to count.
#[derive(Debug, Clone, Copy)]
pub struct GatedItem {
    pub points: i32,
    pub requires: Option<usize>,
}

impl GatedItem {
    pub const fn free(points: i32) -> Self {
        GatedItem {
            points,
            requires: None,
        }
    }

    pub const fn gated(points: i32, requires: usize) -> Self {
        GatedItem {
            points,
            requires: Some(requires),
        }
    }
}

/// Sums gated items. An item whose prerequisite earned zero contributes
/// zero itself, and that zero propagates to anything gated on it in turn.
/// Prerequisites must refer to earlier indices.
pub fn gated_sum(items: &[GatedItem]) -> i32 {
    let mut earned = vec![0; items.len()];
    let mut total = 0;
    for (i, item) in items.iter().enumerate() {
        let blocked = matches!(item.requires, Some(j) if j < i && earned[j] == 0);
        earned[i] = if blocked { 0 } else { item.points };
        total += earned[i];
    }
    total
}

/// Standard logistic function, used by probability-model calculators.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Rounds to `decimals` decimal places, matching the presentation rounding
/// the published calculators apply to their results.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: [Band<i32>; 3] = [lt(2.0, 1), le(3.0, 2), rest(3)];

    #[test]
    fn test_pick_respects_strict_bound() {
        assert_eq!(*pick(1.9, &POINTS), 1);
        assert_eq!(*pick(2.0, &POINTS), 2);
    }

    #[test]
    fn test_pick_respects_inclusive_bound() {
        assert_eq!(*pick(3.0, &POINTS), 2);
        assert_eq!(*pick(3.1, &POINTS), 3);
    }

    #[test]
    fn test_pick_catch_all() {
        assert_eq!(*pick(1e9, &POINTS), 3);
    }

    #[test]
    fn test_gated_sum_zeroes_dependents() {
        // second and third items hang off the first
        let items = [
            GatedItem::free(0),
            GatedItem::gated(2, 0),
            GatedItem::gated(1, 1),
        ];
        assert_eq!(gated_sum(&items), 0);
    }

    #[test]
    fn test_gated_sum_transitive_chain() {
        let items = [
            GatedItem::free(2),
            GatedItem::gated(0, 0),
            GatedItem::gated(1, 1),
        ];
        // middle item earned zero on its own merits, so the chain breaks
        assert_eq!(gated_sum(&items), 2);
    }

    #[test]
    fn test_gated_sum_all_earning() {
        let items = [
            GatedItem::free(2),
            GatedItem::gated(2, 0),
            GatedItem::gated(3, 1),
        ];
        assert_eq!(gated_sum(&items), 7);
    }

    #[test]
    fn test_logistic_midpoint() {
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(38.146, 1), 38.1);
        assert_eq!(round_to(2.345, 2), 2.35);
    }
}
