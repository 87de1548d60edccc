//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – worker pool and integrator options
//! - [`ParametersConfig`] – step size, duration and reference units
//! - [`OutputConfig`]     – where the three output streams go
//! - [`BodyConfig`]       – initial state for each body, SI units
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section and field is optional. Missing values fall back to the
//! defaults, and a missing or empty `bodies` list selects the built-in
//! catalog, so an empty file reproduces the default run.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   threads: 2
//!   parallel: true
//!   anchor_half_kick: "skip"   # or "include"
//!
//! parameters:
//!   dt_days: 0.1
//!   duration_years: 50.0
//!   G: 6.6743e-11
//!   reference_mass: 1.989e30   # kg
//!   reference_length: 1.496e11 # m
//!
//! output:
//!   energies: "energies.txt"
//!   positions: "positions.txt"
//!   angular_momentum: "angular_momentum.txt"
//!
//! bodies:
//!   - name: "Sun"
//!     m: 1.989e30
//!     x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!   - name: "Earth"
//!     m: 5.97237e24
//!     x: [ 1.496e11, 0.0 ]
//!     v: [ 0.0, 29780.0 ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::recording::recorder::OutputPaths;
use crate::simulation::params::AnchorHalfKick;
use crate::simulation::units::{AU, G_SI, SOLAR_MASS};

/// Errors that can occur while loading a scenario.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub threads: usize, // size of the worker pool
    pub parallel: bool, // `false` - serial loops, `true` - rayon fold/reduce
    pub anchor_half_kick: AnchorHalfKick, // whether body 0 gets the first half kick
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 2,
            parallel: true,
            anchor_half_kick: AnchorHalfKick::Skip,
        }
    }
}

/// Step size, run length and the reference quantities used for rescaling
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt_days: f64, // fixed step, days
    pub duration_years: f64, // total simulated time, years
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant, m^3 kg^-1 s^-2
    pub reference_mass: f64, // kg per simulation mass unit
    pub reference_length: f64, // m per simulation length unit
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt_days: 0.1,
            duration_years: 50.0,
            g: G_SI,
            reference_mass: SOLAR_MASS,
            reference_length: AU,
        }
    }
}

/// Paths of the output streams. Relative paths resolve against the working
/// directory, or against `--out-dir` when given.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub energies: PathBuf,
    pub positions: PathBuf,
    pub angular_momentum: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let paths = OutputPaths::default();
        Self {
            energies: paths.energies,
            positions: paths.positions,
            angular_momentum: paths.angular_momentum,
        }
    }
}

impl From<OutputConfig> for OutputPaths {
    fn from(cfg: OutputConfig) -> Self {
        Self {
            energies: cfg.energies,
            positions: cfg.positions,
            angular_momentum: cfg.angular_momentum,
        }
    }
}

/// Configuration for a single body's initial state, SI units
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String, // label used in logs
    pub m: f64, // mass, kg
    pub x: [f64; 2], // position, m
    pub v: [f64; 2], // velocity, m/s
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub output: OutputConfig,
    pub bodies: Vec<BodyConfig>, // empty selects the built-in catalog
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        // an empty document deserializes to unit, not to a mapping
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make the run meaningless or divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let p = &self.parameters;

        if self.engine.threads == 0 {
            return invalid("engine.threads must be at least 1".into());
        }
        if !(p.dt_days.is_finite() && p.dt_days > 0.0) {
            return invalid(format!("parameters.dt_days must be positive, got {}", p.dt_days));
        }
        if !(p.duration_years.is_finite() && p.duration_years >= 0.0) {
            return invalid(format!(
                "parameters.duration_years must be non-negative, got {}",
                p.duration_years
            ));
        }
        for (field, value) in [
            ("G", p.g),
            ("reference_mass", p.reference_mass),
            ("reference_length", p.reference_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("parameters.{field} must be positive, got {value}"));
            }
        }

        for (i, b) in self.bodies.iter().enumerate() {
            if !(b.m.is_finite() && b.m > 0.0) {
                return invalid(format!("body {i} ({}) must have positive mass, got {}", b.name, b.m));
            }
            if b.x.iter().chain(b.v.iter()).any(|c| !c.is_finite()) {
                return invalid(format!("body {i} ({}) has a non-finite coordinate", b.name));
            }
        }
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if self.bodies[i].x == self.bodies[j].x {
                    return invalid(format!(
                        "bodies {i} ({}) and {j} ({}) start at the same position",
                        self.bodies[i].name, self.bodies[j].name
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Load and validate a scenario from a YAML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let contents = fs::read_to_string(path.as_ref())?;
    ScenarioConfig::from_yaml_str(&contents)
}
