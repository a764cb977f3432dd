//! Descriptive statistics over simulation output.
//!
//! All functions take a slice and work on a sorted copy where ordering
//! matters, so the caller's iteration order is left untouched.

pub mod sensitivity;

use serde::{Deserialize, Serialize};

pub use sensitivity::{cost_drivers, CostDriver, Driver};

/// Sorted copy of `values` (total order, NaN last).
#[must_use]
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolation percentile of an already sorted slice.
///
/// Returns `None` for an empty slice or `p` outside `[0, 100]`.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Linear-interpolation percentile.
///
/// # Example
///
/// ```rust
/// use sprintsim::stats::percentile;
///
/// let values = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&values, 50.0), Some(2.5));
/// assert_eq!(percentile(&values, 100.0), Some(4.0));
/// assert_eq!(percentile(&values, 101.0), None);
/// ```
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    percentile_sorted(&sorted_copy(values), p)
}

/// Median (50th percentile).
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Fraction of items matching `predicate`, in `[0, 1]`.
#[must_use]
pub fn fraction<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let hits = items.iter().filter(|item| predicate(item)).count();
    Some(hits as f64 / items.len() as f64)
}

/// Median, P80 and P90 of one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 50th percentile.
    pub median: f64,
    /// 80th percentile.
    pub p80: f64,
    /// 90th percentile.
    pub p90: f64,
}

impl Percentiles {
    /// Compute from unsorted values, sorting once.
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        Some(Self {
            median: percentile_sorted(&sorted, 50.0)?,
            p80: percentile_sorted(&sorted, 80.0)?,
            p90: percentile_sorted(&sorted, 90.0)?,
        })
    }
}
