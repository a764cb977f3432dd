//! Project configuration with YAML schema and validation.
//!
//! Implements mistake-proofing through:
//! - Type-safe configuration structs
//! - Structural validation via `validator` attributes
//! - Runtime semantic validation (finite values, ordered ranges)
//!
//! Risk factors are deliberately *not* validated: values outside `[0, 1]`
//! are clamped silently by [`RiskProfile::clamped`] when a simulation is
//! built.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{SimError, SimResult};
use crate::simulation::{DAYS_PER_SPRINT, WORK_DAYS_PER_MONTH};

/// Top-level simulation configuration.
///
/// Immutable for the duration of a run. Loaded from YAML or assembled with
/// [`SimulationConfig::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Master seed. `None` draws a fresh seed from OS entropy per run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of Monte Carlo iterations.
    #[validate(range(min = 1))]
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Team composition and daily rates.
    #[validate(nested)]
    #[serde(default)]
    pub team: TeamConfig,

    /// Baseline project scope.
    #[validate(nested)]
    #[serde(default)]
    pub scope: ScopeConfig,

    /// Team velocity.
    #[validate(nested)]
    #[serde(default)]
    pub velocity: VelocityConfig,

    /// Risk drivers.
    #[serde(default)]
    pub risk: RiskProfile,

    /// Optional cloud infrastructure cost range.
    #[serde(default = "default_cloud")]
    pub cloud: Option<CloudConfig>,

    /// Optional managed service (ongoing support) cost.
    #[serde(default = "default_managed_service")]
    pub managed_service: Option<ManagedServiceConfig>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_iterations() -> usize {
    5_000
}

#[allow(clippy::unnecessary_wraps)]
fn default_cloud() -> Option<CloudConfig> {
    Some(CloudConfig::default())
}

#[allow(clippy::unnecessary_wraps)]
fn default_managed_service() -> Option<ManagedServiceConfig> {
    Some(ManagedServiceConfig::default())
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SimError::serialization(format!("YAML serialization failed: {e}")))
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Run structural and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Validation`] for schema violations (for example
    /// zero iterations or a negative rate) and [`SimError::Config`] for
    /// semantic problems.
    pub fn check(&self) -> SimResult<()> {
        if self.iterations < 1 {
            return Err(SimError::config(format!(
                "iterations must be at least 1, got {}",
                self.iterations
            )));
        }
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SimResult<()> {
        for (role, cfg) in self.team.roles() {
            require_non_negative(&format!("team.{role}.daily_rate"), cfg.daily_rate)?;
        }

        require_non_negative("scope.baseline_points", self.scope.baseline_points)?;

        if !self.velocity.mean.is_finite() || self.velocity.mean <= 0.0 {
            return Err(SimError::config(format!(
                "velocity.mean must be positive, got {}",
                self.velocity.mean
            )));
        }

        if let Some(cloud) = &self.cloud {
            require_non_negative("cloud.monthly_min", cloud.monthly_min)?;
            require_non_negative("cloud.monthly_max", cloud.monthly_max)?;
            if cloud.monthly_min > cloud.monthly_max {
                return Err(SimError::config(format!(
                    "cloud.monthly_min ({}) exceeds cloud.monthly_max ({})",
                    cloud.monthly_min, cloud.monthly_max
                )));
            }
        }

        if let Some(managed) = &self.managed_service {
            require_non_negative("managed_service.percentage", managed.percentage)?;
        }

        Ok(())
    }

    /// Sprints needed with every risk at zero (scope / mean velocity).
    #[must_use]
    pub fn baseline_sprints(&self) -> f64 {
        self.scope.baseline_points / self.velocity.mean
    }

    /// Months needed with every risk at zero.
    #[must_use]
    pub fn baseline_months(&self) -> f64 {
        self.baseline_sprints() * DAYS_PER_SPRINT / WORK_DAYS_PER_MONTH
    }
}

fn require_non_negative(field: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::config(format!(
            "{field} must be a finite, non-negative number, got {value}"
        )))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            seed: None,
            iterations: default_iterations(),
            team: TeamConfig::default(),
            scope: ScopeConfig::default(),
            velocity: VelocityConfig::default(),
            risk: RiskProfile::default(),
            cloud: default_cloud(),
            managed_service: default_managed_service(),
        }
    }
}

/// Configuration builder for programmatic construction.
///
/// Starts from [`SimulationConfig::default`]. `build` does not validate;
/// validation happens when a [`crate::simulation::Simulation`] is created.
#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the iteration count.
    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Set the baseline scope in story points.
    #[must_use]
    pub fn baseline_scope(mut self, points: f64) -> Self {
        self.config.scope.baseline_points = points;
        self
    }

    /// Set the mean velocity in story points per sprint.
    #[must_use]
    pub fn velocity_mean(mut self, mean: f64) -> Self {
        self.config.velocity.mean = mean;
        self
    }

    /// Set the team.
    #[must_use]
    pub fn team(mut self, team: TeamConfig) -> Self {
        self.config.team = team;
        self
    }

    /// Set all risk drivers.
    #[must_use]
    pub fn risk(mut self, risk: RiskProfile) -> Self {
        self.config.risk = risk;
        self
    }

    /// Enable cloud costs with a monthly range.
    #[must_use]
    pub fn cloud(mut self, monthly_min: f64, monthly_max: f64) -> Self {
        self.config.cloud = Some(CloudConfig {
            monthly_min,
            monthly_max,
        });
        self
    }

    /// Disable cloud costs.
    #[must_use]
    pub fn without_cloud(mut self) -> Self {
        self.config.cloud = None;
        self
    }

    /// Enable the managed service at a fraction of the one-off cost.
    #[must_use]
    pub fn managed_service(mut self, percentage: f64, accrual: ManagedServiceAccrual) -> Self {
        self.config.managed_service = Some(ManagedServiceConfig {
            percentage,
            accrual,
        });
        self
    }

    /// Disable the managed service.
    #[must_use]
    pub fn without_managed_service(mut self) -> Self {
        self.config.managed_service = None;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SimulationConfig {
        self.config
    }
}

/// One billable role: daily rate and how many people fill it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    /// Daily rate in currency units.
    #[validate(range(min = 0.0))]
    pub daily_rate: f64,
    /// Number of people in the role.
    pub headcount: u32,
}

impl RoleConfig {
    /// Create a role.
    #[must_use]
    pub const fn new(daily_rate: f64, headcount: u32) -> Self {
        Self {
            daily_rate,
            headcount,
        }
    }

    /// Cost of the role per working day.
    #[must_use]
    pub fn daily_cost(&self) -> f64 {
        self.daily_rate * f64::from(self.headcount)
    }
}

/// Team composition.
///
/// A role block may leave out either field; the gap is filled from that
/// role's entry in [`TeamConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct TeamConfig {
    /// Developers.
    #[validate(nested)]
    #[serde(deserialize_with = "developer_role")]
    pub developer: RoleConfig,
    /// QA testers.
    #[validate(nested)]
    #[serde(deserialize_with = "qa_role")]
    pub qa: RoleConfig,
    /// Project managers.
    #[validate(nested)]
    #[serde(deserialize_with = "pm_role")]
    pub pm: RoleConfig,
}

/// Role block as written in YAML, before defaults are applied.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialRole {
    daily_rate: Option<f64>,
    headcount: Option<u32>,
}

impl PartialRole {
    fn or(self, fallback: RoleConfig) -> RoleConfig {
        RoleConfig {
            daily_rate: self.daily_rate.unwrap_or(fallback.daily_rate),
            headcount: self.headcount.unwrap_or(fallback.headcount),
        }
    }
}

fn developer_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RoleConfig, D::Error> {
    PartialRole::deserialize(deserializer).map(|role| role.or(TeamConfig::default().developer))
}

fn qa_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RoleConfig, D::Error> {
    PartialRole::deserialize(deserializer).map(|role| role.or(TeamConfig::default().qa))
}

fn pm_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RoleConfig, D::Error> {
    PartialRole::deserialize(deserializer).map(|role| role.or(TeamConfig::default().pm))
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            developer: RoleConfig::new(400.0, 2),
            qa: RoleConfig::new(350.0, 2),
            pm: RoleConfig::new(500.0, 1),
        }
    }
}

impl TeamConfig {
    /// Roles with their configuration keys.
    #[must_use]
    pub const fn roles(&self) -> [(&'static str, &RoleConfig); 3] {
        [
            ("developer", &self.developer),
            ("qa", &self.qa),
            ("pm", &self.pm),
        ]
    }

    /// Combined cost of the whole team per working day.
    #[must_use]
    pub fn daily_burn(&self) -> f64 {
        self.roles().iter().map(|(_, role)| role.daily_cost()).sum()
    }
}

/// Baseline scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeConfig {
    /// Expected scope in story points.
    #[validate(range(min = 0.0))]
    pub baseline_points: f64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            baseline_points: 500.0,
        }
    }
}

/// Velocity configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct VelocityConfig {
    /// Mean story points completed per sprint.
    #[validate(range(min = 0.0))]
    pub mean: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self { mean: 20.0 }
    }
}

/// Risk drivers, each a fraction where 0 is stable and 1 is chaotic.
///
/// Factors left out of a YAML block keep their [`Default`] values; use
/// `0` to switch one off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskProfile {
    /// Uncertain scope: spread of the initial scope estimate.
    pub scope: f64,
    /// Variable team speed: spread of sprint velocity.
    pub velocity: f64,
    /// Hidden bugs: defects, technical debt and rework effort.
    pub rework: f64,
    /// Changing priorities: mid-project scope growth.
    pub drift: f64,
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            scope: 0.30,
            velocity: 0.25,
            rework: 0.35,
            drift: 0.20,
        }
    }
}

impl RiskProfile {
    /// Every risk at zero.
    pub const NONE: Self = Self {
        scope: 0.0,
        velocity: 0.0,
        rework: 0.0,
        drift: 0.0,
    };

    /// Copy with each factor clamped into `[0, 1]`; non-finite becomes 0.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            scope: clamp_unit(self.scope),
            velocity: clamp_unit(self.velocity),
            rework: clamp_unit(self.rework),
            drift: clamp_unit(self.drift),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Monthly cloud infrastructure cost range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudConfig {
    /// Cheapest expected month.
    pub monthly_min: f64,
    /// Most expensive expected month.
    pub monthly_max: f64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            monthly_min: 1_000.0,
            monthly_max: 5_000.0,
        }
    }
}

/// Managed service charged as a fraction of the one-off cost per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagedServiceConfig {
    /// Annual fee as a fraction of the one-off cost (0.15 = 15%).
    pub percentage: f64,
    /// How much of the annual fee counts towards TCO.
    pub accrual: ManagedServiceAccrual,
}

impl Default for ManagedServiceConfig {
    fn default() -> Self {
        Self {
            percentage: 0.15,
            accrual: ManagedServiceAccrual::FullYear,
        }
    }
}

/// Portion of the annual managed-service fee included in TCO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagedServiceAccrual {
    /// One full year of service.
    #[default]
    FullYear,
    /// Prorated over the project duration (months / 12).
    ProjectDuration,
}
