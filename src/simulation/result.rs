//! Per-iteration simulation output.

use serde::{Deserialize, Serialize};

/// Metrics of one simulated project.
///
/// Created fresh by the sampler for every iteration and never mutated
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationResult {
    /// Final scope in story points (after uncertainty and drift).
    pub scope_sp: f64,
    /// Sampled velocity in story points per sprint.
    pub velocity: f64,
    /// Rework effort in story points.
    pub rework_sp: f64,
    /// Sprints needed for scope plus rework.
    pub sprints: f64,
    /// Working days.
    pub duration_days: f64,
    /// Calendar months.
    pub duration_months: f64,
    /// Labour cost of building the project.
    pub one_off_cost: f64,
    /// Cloud infrastructure cost over the project duration.
    pub cloud_cost: f64,
    /// Annual managed-service fee.
    pub managed_service_annual: f64,
    /// Portion of the managed-service fee counted in TCO.
    pub managed_service_cost: f64,
    /// Total cost of ownership.
    pub tco_total: f64,
    /// Price billed to the client.
    pub billed_price: f64,
    /// Billed price minus TCO.
    pub profit: f64,
    /// Profit as a fraction of the billed price.
    pub margin: f64,
}

impl IterationResult {
    /// Whether the iteration made money.
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }

    /// Margin as a percentage.
    #[must_use]
    pub fn margin_pct(&self) -> f64 {
        self.margin * 100.0
    }
}
