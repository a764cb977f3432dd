//! Single-iteration project sampler.
//!
//! Draws one scenario from the configured distributions and derives its
//! duration, costs and profit. Draw order is fixed (scope, drift, velocity,
//! rework base, rework tail, cloud), so a seeded source always reproduces
//! the same iteration.
//!
//! | Quantity | Distribution |
//! |----------|--------------|
//! | Scope    | Triangular(base·(1 − 0.5·r), base, base·(1 + r)) |
//! | Drift    | base · Beta(2, 5) · r_drift |
//! | Velocity | Normal(mean, mean · r_velocity), floored at 25% of mean |
//! | Rework   | r_bugs · Beta(3, 8) + Exp(mean = r_bugs), capped at 1 |
//! | Cloud    | Uniform(min, max) per month |

use rand::Rng;
use rand_distr::{Beta, Distribution, Exp, Normal, Triangular};
use std::fmt::Display;

use super::result::IterationResult;
use super::{DAYS_PER_SPRINT, MONTHS_PER_YEAR, TARGET_MARKUP, WORK_DAYS_PER_MONTH};
use crate::config::{
    CloudConfig, ManagedServiceAccrual, ManagedServiceConfig, RiskProfile, SimulationConfig,
};
use crate::error::{SimError, SimResult};

/// Smallest final scope a project can have.
pub const MIN_SCOPE_SP: f64 = 1.0;

/// Velocity floor as a fraction of the mean velocity.
pub const MIN_VELOCITY_FRACTION: f64 = 0.25;

/// Rework can at most double the effort.
pub const MAX_REWORK_FRACTION: f64 = 1.0;

/// Downside spread of the scope triangle per unit of scope risk.
const SCOPE_DOWNSIDE: f64 = 0.5;

/// Upside spread of the scope triangle per unit of scope risk.
const SCOPE_UPSIDE: f64 = 1.0;

/// Samples [`IterationResult`]s for one configuration.
///
/// Distributions are built once in [`Sampler::new`]; [`Sampler::sample`] is
/// a pure function of the sampler and the random source.
#[derive(Debug, Clone)]
pub struct Sampler {
    risk: RiskProfile,
    baseline_scope: f64,
    daily_burn: f64,
    /// `None` when the scope spread is zero.
    scope: Option<Triangular<f64>>,
    drift: Beta<f64>,
    velocity: Normal<f64>,
    velocity_floor: f64,
    rework_base: Beta<f64>,
    /// `None` when the hidden-bugs risk is zero.
    rework_tail: Option<Exp<f64>>,
    cloud: Option<CloudConfig>,
    managed_service: Option<ManagedServiceConfig>,
}

impl Sampler {
    /// Build a sampler for a configuration.
    ///
    /// Risk factors are clamped into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration fails validation.
    pub fn new(config: &SimulationConfig) -> SimResult<Self> {
        config.check()?;

        let risk = config.risk.clamped();
        let base = config.scope.baseline_points;

        let scope = if base > 0.0 && risk.scope > 0.0 {
            let min = base * (1.0 - SCOPE_DOWNSIDE * risk.scope);
            let max = base * (1.0 + SCOPE_UPSIDE * risk.scope);
            Some(Triangular::new(min, max, base).map_err(invalid("scope"))?)
        } else {
            None
        };

        let mean_velocity = config.velocity.mean;
        let velocity =
            Normal::new(mean_velocity, mean_velocity * risk.velocity).map_err(invalid("velocity"))?;

        let rework_tail = if risk.rework > 0.0 {
            Some(Exp::new(1.0 / risk.rework).map_err(invalid("rework tail"))?)
        } else {
            None
        };

        Ok(Self {
            risk,
            baseline_scope: base,
            daily_burn: config.team.daily_burn(),
            scope,
            drift: Beta::new(2.0, 5.0).map_err(invalid("scope drift"))?,
            velocity,
            velocity_floor: mean_velocity * MIN_VELOCITY_FRACTION,
            rework_base: Beta::new(3.0, 8.0).map_err(invalid("rework"))?,
            rework_tail,
            cloud: config.cloud,
            managed_service: config.managed_service,
        })
    }

    /// Clamped risk profile the sampler draws with.
    #[must_use]
    pub const fn risk(&self) -> &RiskProfile {
        &self.risk
    }

    /// Draw one simulated project.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> IterationResult {
        let initial_scope = self
            .scope
            .as_ref()
            .map_or(self.baseline_scope, |d| d.sample(rng));
        let drift = self.baseline_scope * self.drift.sample(rng) * self.risk.drift;
        let scope_sp = (initial_scope + drift).max(MIN_SCOPE_SP);

        let velocity = self.velocity.sample(rng).max(self.velocity_floor);

        let rework_base = self.risk.rework * self.rework_base.sample(rng);
        let rework_tail = self.rework_tail.as_ref().map_or(0.0, |d| d.sample(rng));
        let rework_fraction = (rework_base + rework_tail).clamp(0.0, MAX_REWORK_FRACTION);
        let rework_sp = scope_sp * rework_fraction;

        let sprints = (scope_sp + rework_sp) / velocity;
        let duration_days = sprints * DAYS_PER_SPRINT;
        let duration_months = duration_days / WORK_DAYS_PER_MONTH;

        let one_off_cost = duration_days * self.daily_burn;

        let cloud_cost = self.cloud.map_or(0.0, |cloud| {
            uniform(rng, cloud.monthly_min, cloud.monthly_max) * duration_months
        });

        let (managed_service_annual, managed_service_cost) =
            self.managed_service.map_or((0.0, 0.0), |managed| {
                let annual = one_off_cost * managed.percentage;
                let accrued = match managed.accrual {
                    ManagedServiceAccrual::FullYear => annual,
                    ManagedServiceAccrual::ProjectDuration => {
                        annual * duration_months / MONTHS_PER_YEAR
                    }
                };
                (annual, accrued)
            });

        let tco_total = one_off_cost + managed_service_cost + cloud_cost;
        let billed_price = one_off_cost * (1.0 + TARGET_MARKUP);
        let profit = billed_price - tco_total;
        let margin = if billed_price > 0.0 {
            profit / billed_price
        } else {
            0.0
        };

        IterationResult {
            scope_sp,
            velocity,
            rework_sp,
            sprints,
            duration_days,
            duration_months,
            one_off_cost,
            cloud_cost,
            managed_service_annual,
            managed_service_cost,
            tco_total,
            billed_price,
            profit,
            margin,
        }
    }
}

/// Uniform draw in `[lo, hi)`; returns `lo` when the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.gen::<f64>()
}

fn invalid<E: Display>(name: &'static str) -> impl Fn(E) -> SimError {
    move |e| SimError::config(format!("invalid {name} distribution: {e}"))
}
