//! Summary statistics over a full run.

use serde::{Deserialize, Serialize};

use super::result::IterationResult;
use crate::stats::{self, Percentiles};

/// Headline numbers for one simulation run.
///
/// Derived once from the result set and never updated; a new run produces
/// a new summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Number of iterations summarized.
    pub iterations: usize,
    /// Total cost of ownership percentiles.
    pub tco: Percentiles,
    /// Duration percentiles in months.
    pub duration_months: Percentiles,
    /// Median final scope in story points.
    pub median_scope_sp: f64,
    /// Median profit margin as a fraction of the billed price.
    pub median_margin: f64,
    /// Median profit.
    pub median_profit: f64,
    /// Mean total cost of ownership.
    pub mean_tco: f64,
    /// Fraction of iterations with profit above zero.
    pub probability_of_profit: f64,
}

impl SimulationSummary {
    /// Summarize a result set. `None` if it is empty.
    #[must_use]
    pub fn from_results(results: &[IterationResult]) -> Option<Self> {
        let column = |f: fn(&IterationResult) -> f64| results.iter().map(f).collect::<Vec<_>>();

        let tco = column(|r| r.tco_total);

        Some(Self {
            iterations: results.len(),
            tco: Percentiles::of(&tco)?,
            duration_months: Percentiles::of(&column(|r| r.duration_months))?,
            median_scope_sp: stats::median(&column(|r| r.scope_sp))?,
            median_margin: stats::median(&column(|r| r.margin))?,
            median_profit: stats::median(&column(|r| r.profit))?,
            mean_tco: stats::mean(&tco)?,
            probability_of_profit: stats::fraction(results, IterationResult::is_profitable)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(tco: f64, months: f64, profit: f64) -> IterationResult {
        IterationResult {
            scope_sp: 100.0,
            velocity: 20.0,
            rework_sp: 0.0,
            sprints: months * 2.0,
            duration_days: months * 20.0,
            duration_months: months,
            one_off_cost: tco,
            cloud_cost: 0.0,
            managed_service_annual: 0.0,
            managed_service_cost: 0.0,
            tco_total: tco,
            billed_price: tco + profit,
            profit,
            margin: profit / (tco + profit),
        }
    }

    #[test]
    fn test_summary_of_known_values() {
        let results = vec![
            result(100.0, 1.0, 10.0),
            result(300.0, 3.0, -5.0),
            result(200.0, 2.0, 0.0),
            result(400.0, 4.0, 20.0),
        ];
        let summary = SimulationSummary::from_results(&results).unwrap();

        assert_eq!(summary.iterations, 4);
        assert!((summary.tco.median - 250.0).abs() < 1e-12);
        assert!((summary.mean_tco - 250.0).abs() < 1e-12);
        assert!((summary.duration_months.median - 2.5).abs() < 1e-12);
        assert!((summary.median_scope_sp - 100.0).abs() < 1e-12);
        assert!((summary.median_profit - 5.0).abs() < 1e-12);
        // zero profit does not count as profitable
        assert!((summary.probability_of_profit - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_empty_set() {
        assert!(SimulationSummary::from_results(&[]).is_none());
    }
}
