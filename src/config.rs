//! Engine configuration: default tunables and the immutable [`SimulationConfig`] record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default gravitational constant.
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f32 = 4.0;

/// Default speed limit applied to every living body after integration.
pub const DEFAULT_MAX_SPEED: f32 = 3.5;

/// Fraction of the summed radii two bodies must close within to merge.
pub const DEFAULT_COLLISION_FACTOR: f32 = 0.3;

/// Lower bound for the adaptive core radius.
pub const DEFAULT_MIN_CORE_RADIUS: f32 = 1.0;

/// Upper bound for the adaptive core radius.
pub const DEFAULT_MAX_CORE_RADIUS: f32 = 20.0;

/// Proportional rate at which the core radius chases its target population.
pub const DEFAULT_CORE_CHANGE_RATE: f32 = 1.0;

/// Share of the population the core radius aims to enclose.
pub const DEFAULT_CORE_SHARE: f32 = 0.5;

/// Default number of bodies (and fixed store capacity).
pub const DEFAULT_POPULATION: usize = 2000;

/// Initial tangential speed range used when seeding a population.
pub const DEFAULT_START_SPEED: [f32; 2] = [1.0, 2.0];

/// Initial body radius range used when seeding a population.
pub const DEFAULT_START_RADIUS: [f32; 2] = [0.05, 0.15];

/// Scale of the seeding sphere, `scale * (n * 3 / 4π)^(1/2)`.
pub const DEFAULT_SYSTEM_RADIUS_SCALE: f32 = 0.5;

/// Lifetime handed to seeded bodies, in renderer seconds.
pub const DEFAULT_START_LIFETIME: f32 = 1.0e6;

/// How the adaptive core sizes itself relative to the population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetCoreSize {
    /// Fraction of the population, in `(0, 1]`.
    Share(f32),
    /// Absolute body count.
    Count(usize),
}

impl Default for TargetCoreSize {
    fn default() -> Self {
        TargetCoreSize::Share(DEFAULT_CORE_SHARE)
    }
}

/// Convention used for the `released_energy` carried by each burst.
///
/// Only effect intensity depends on this choice; the merge itself is identical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnergyModel {
    /// Kinetic energy lost in a head-on inelastic collision,
    /// `(p_before - p_after)^2 / (2 m')` using scalar momenta.
    #[default]
    LostKinetic,
    /// `scale * absorbed_radius`.
    AbsorbedRadius { scale: f32 },
    /// The absorbed body's mass.
    AbsorbedMass,
}

/// Immutable tunables injected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravitational_constant: f32,
    pub max_speed: f32,
    pub collision_factor: f32,
    pub min_core_radius: f32,
    pub max_core_radius: f32,
    pub core_change_rate: f32,
    pub target_core: TargetCoreSize,
    /// Body count for seeding; also the fixed store capacity.
    pub population: usize,
    pub energy_model: EnergyModel,
    /// Drift positions by `velocity * dt` inside the step.
    /// Disable when the renderer advances particles on its own.
    pub advance_positions: bool,
    /// Rewrite each living body's remaining lifetime to its start lifetime on
    /// commit, so the renderer never retires a body that is still simulated.
    /// Disable to pass lifetimes through unchanged.
    pub refresh_lifetimes: bool,
    pub min_start_speed: f32,
    pub max_start_speed: f32,
    pub min_start_radius: f32,
    pub max_start_radius: f32,
    pub system_radius_scale: f32,
    pub start_lifetime: f32,
    /// Warn when a single step takes longer than this many milliseconds.
    pub step_budget_ms: Option<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            max_speed: DEFAULT_MAX_SPEED,
            collision_factor: DEFAULT_COLLISION_FACTOR,
            min_core_radius: DEFAULT_MIN_CORE_RADIUS,
            max_core_radius: DEFAULT_MAX_CORE_RADIUS,
            core_change_rate: DEFAULT_CORE_CHANGE_RATE,
            target_core: TargetCoreSize::default(),
            population: DEFAULT_POPULATION,
            energy_model: EnergyModel::default(),
            advance_positions: true,
            refresh_lifetimes: true,
            min_start_speed: DEFAULT_START_SPEED[0],
            max_start_speed: DEFAULT_START_SPEED[1],
            min_start_radius: DEFAULT_START_RADIUS[0],
            max_start_radius: DEFAULT_START_RADIUS[1],
            system_radius_scale: DEFAULT_SYSTEM_RADIUS_SCALE,
            start_lifetime: DEFAULT_START_LIFETIME,
            step_budget_ms: None,
        }
    }
}

impl SimulationConfig {
    /// Default tunables with a different population size.
    pub fn with_population(population: usize) -> Self {
        Self {
            population,
            ..Self::default()
        }
    }

    /// Parses a JSON document (missing fields fall back to defaults) and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of core members the partitioner steers towards.
    pub fn target_core_size(&self) -> usize {
        match self.target_core {
            TargetCoreSize::Share(share) => ((self.population as f32 * share) as usize).max(1),
            TargetCoreSize::Count(count) => count,
        }
    }

    /// Checks every tunable for a usable value.
    pub fn validate(&self) -> Result<()> {
        finite_at_least("gravitational_constant", self.gravitational_constant, 0.0)?;
        finite_positive("max_speed", self.max_speed)?;
        finite_positive("collision_factor", self.collision_factor)?;
        finite_positive("min_core_radius", self.min_core_radius)?;
        finite_positive("max_core_radius", self.max_core_radius)?;
        if self.min_core_radius > self.max_core_radius {
            return Err(ConfigError::InvalidRange {
                name: "core_radius",
                min: self.min_core_radius,
                max: self.max_core_radius,
            });
        }
        finite_at_least("core_change_rate", self.core_change_rate, 0.0)?;

        match self.target_core {
            TargetCoreSize::Share(share) => {
                if !share.is_finite() || share <= 0.0 || share > 1.0 {
                    return Err(ConfigError::InvalidValue {
                        name: "target_core.share",
                        value: share,
                    });
                }
            }
            TargetCoreSize::Count(0) => return Err(ConfigError::EmptyCoreTarget),
            TargetCoreSize::Count(_) => {}
        }

        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }

        if let EnergyModel::AbsorbedRadius { scale } = self.energy_model {
            finite_at_least("energy_model.scale", scale, 0.0)?;
        }

        finite_at_least("min_start_speed", self.min_start_speed, 0.0)?;
        finite_at_least("max_start_speed", self.max_start_speed, 0.0)?;
        if self.min_start_speed > self.max_start_speed {
            return Err(ConfigError::InvalidRange {
                name: "start_speed",
                min: self.min_start_speed,
                max: self.max_start_speed,
            });
        }

        finite_positive("min_start_radius", self.min_start_radius)?;
        finite_positive("max_start_radius", self.max_start_radius)?;
        if self.min_start_radius > self.max_start_radius {
            return Err(ConfigError::InvalidRange {
                name: "start_radius",
                min: self.min_start_radius,
                max: self.max_start_radius,
            });
        }

        finite_positive("system_radius_scale", self.system_radius_scale)?;
        finite_at_least("start_lifetime", self.start_lifetime, 0.0)?;
        if let Some(budget) = self.step_budget_ms {
            finite_positive("step_budget_ms", budget)?;
        }

        Ok(())
    }
}

fn finite_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}

fn finite_at_least(name: &'static str, value: f32, min: f32) -> Result<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}

/// Reasons a configuration record is rejected at construction.
#[derive(Debug)]
pub enum ConfigError {
    /// A tunable is non-finite or outside its allowed domain.
    InvalidValue { name: &'static str, value: f32 },
    /// A `min`/`max` pair is inverted.
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    /// `population` is zero.
    EmptyPopulation,
    /// `target_core` asks for zero core members.
    EmptyCoreTarget,
    /// The configuration document could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidValue { name, value } => write!(f, "invalid value for {name}: {value}"),
            Self::InvalidRange { name, min, max } => {
                write!(f, "invalid {name} range: min {min} > max {max}")
            }
            Self::EmptyPopulation => write!(f, "population must contain at least one body"),
            Self::EmptyCoreTarget => write!(f, "target core size must be at least one body"),
            Self::Parse(err) => write!(f, "config parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Convenient Result alias for configuration handling.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn share_target_scales_with_population() {
        let config = SimulationConfig::with_population(2000);
        assert_eq!(config.target_core_size(), 1000);

        let tiny = SimulationConfig {
            population: 1,
            target_core: TargetCoreSize::Share(0.5),
            ..SimulationConfig::default()
        };
        assert_eq!(tiny.target_core_size(), 1);
    }

    #[test]
    fn count_target_is_used_verbatim() {
        let config = SimulationConfig {
            target_core: TargetCoreSize::Count(200),
            ..SimulationConfig::default()
        };
        assert_eq!(config.target_core_size(), 200);
    }

    #[test]
    fn inverted_core_bounds_are_rejected() {
        let config = SimulationConfig {
            min_core_radius: 10.0,
            max_core_radius: 2.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                name: "core_radius",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_and_zero_values_are_rejected() {
        let nan_speed = SimulationConfig {
            max_speed: f32::NAN,
            ..SimulationConfig::default()
        };
        assert!(nan_speed.validate().is_err());

        let zero_factor = SimulationConfig {
            collision_factor: 0.0,
            ..SimulationConfig::default()
        };
        assert!(zero_factor.validate().is_err());

        let empty = SimulationConfig::with_population(0);
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyPopulation)));

        let bad_share = SimulationConfig {
            target_core: TargetCoreSize::Share(1.5),
            ..SimulationConfig::default()
        };
        assert!(bad_share.validate().is_err());
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = SimulationConfig::from_json_str(
            r#"{ "max_speed": 5.0, "target_core": { "count": 64 }, "energy_model": "absorbed_mass" }"#,
        )
        .expect("valid document");

        assert_eq!(config.max_speed, 5.0);
        assert_eq!(config.target_core, TargetCoreSize::Count(64));
        assert_eq!(config.energy_model, EnergyModel::AbsorbedMass);
        assert_eq!(config.collision_factor, DEFAULT_COLLISION_FACTOR);
    }

    #[test]
    fn json_errors_are_reported() {
        let err = SimulationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());

        let err = SimulationConfig::from_json_str(r#"{ "population": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPopulation));
    }
}
