//! Cost-driver sensitivity.
//!
//! Correlates total cost of ownership with each sampled input across a run
//! to show which sources of uncertainty move the cost most.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::IterationResult;

/// Correlations at or below this magnitude are treated as noise.
pub const DRIVER_THRESHOLD: f64 = 0.1;

/// Correlations above this magnitude mark a high-impact driver.
pub const HIGH_IMPACT_THRESHOLD: f64 = 0.2;

/// A sampled input that can drive cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// Final scope (uncertainty plus drift).
    Scope,
    /// Team velocity.
    Velocity,
    /// Rework effort from hidden bugs.
    Rework,
    /// Cloud infrastructure cost.
    Cloud,
}

impl Driver {
    /// Every driver, in report order.
    pub const ALL: [Self; 4] = [Self::Scope, Self::Velocity, Self::Rework, Self::Cloud];

    fn value(self, result: &IterationResult) -> f64 {
        match self {
            Self::Scope => result.scope_sp,
            Self::Velocity => result.velocity,
            Self::Rework => result.rework_sp,
            Self::Cloud => result.cloud_cost,
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scope => "Scope",
            Self::Velocity => "Velocity",
            Self::Rework => "Rework",
            Self::Cloud => "Cloud",
        };
        f.write_str(name)
    }
}

/// Correlation of one driver with total TCO.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDriver {
    /// The input.
    pub driver: Driver,
    /// Pearson correlation with `tco_total`, in `[-1, 1]`.
    pub correlation: f64,
}

impl CostDriver {
    /// Whether the correlation is large enough to report.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        self.correlation.abs() > DRIVER_THRESHOLD
    }

    /// Whether the driver is among the highest-impact risks.
    #[must_use]
    pub fn is_high_impact(&self) -> bool {
        self.correlation.abs() > HIGH_IMPACT_THRESHOLD
    }
}

/// Correlate every driver with TCO, strongest first.
///
/// Drivers whose correlation is undefined (a constant column, e.g. cloud
/// cost when cloud is disabled) are left out.
#[must_use]
pub fn cost_drivers(results: &[IterationResult]) -> Vec<CostDriver> {
    let tco: Vec<f64> = results.iter().map(|r| r.tco_total).collect();

    let mut drivers: Vec<CostDriver> = Driver::ALL
        .iter()
        .filter_map(|&driver| {
            let values: Vec<f64> = results.iter().map(|r| driver.value(r)).collect();
            pearson(&values, &tco).map(|correlation| CostDriver {
                driver,
                correlation,
            })
        })
        .collect();

    drivers.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    drivers
}

/// Pearson correlation coefficient.
///
/// `None` when lengths differ, fewer than two points are given, or either
/// series has zero variance.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if is_flat(xs, var_x) || is_flat(ys, var_y) {
        return None;
    }
    let denom = var_x.sqrt() * var_y.sqrt();
    if !denom.is_finite() {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Relative spread below which a series counts as constant.
const FLAT_TOLERANCE: f64 = 1e-12;

/// Whether a series' summed squared deviation is rounding noise relative to
/// its own magnitude.
fn is_flat(values: &[f64], sum_sq_dev: f64) -> bool {
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let n = values.len() as f64;
    sum_sq_dev <= n * (FLAT_TOLERANCE * scale).powi(2)
}
