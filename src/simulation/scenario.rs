//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters in simulation units (`Parameters`)
//! - the reference units for this run (`UnitScale`)
//! - the initial state, still in SI units (`PhysicalSystem` at t = 0)
//! - the active force set (`AccelSet`)
//! - the output stream locations (`OutputPaths`)

use log::info;

use crate::configuration::config::{BodyConfig, ConfigError, ScenarioConfig};
use crate::recording::recorder::OutputPaths;
use crate::simulation::catalog;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, PhysicalSystem, System};
use crate::simulation::units::UnitScale;

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub scale: UnitScale,
    pub system: PhysicalSystem,
    pub forces: AccelSet,
    pub output: OutputPaths,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Bodies: an empty list means the built-in catalog
        let bodies: Vec<Body> = if cfg.bodies.is_empty() {
            catalog::solar_system()
        } else {
            cfg.bodies.iter().enumerate().map(|(i, bc): (usize, &BodyConfig)| {
                let name = if bc.name.is_empty() { format!("body{i}") } else { bc.name.clone() };
                Body::new(name, bc.m, bc.x, bc.v)
            }).collect()
        };

        let p_cfg = cfg.parameters;
        let scale = UnitScale::new(p_cfg.reference_mass, p_cfg.reference_length, p_cfg.g);

        // Step and end time in simulation units
        let parameters = Parameters::new(
            scale.days_to_sim(p_cfg.dt_days),
            scale.years_to_sim(p_cfg.duration_years),
        ).with_anchor(cfg.engine.anchor_half_kick);

        let engine = Engine {
            threads: cfg.engine.threads,
            parallel: cfg.engine.parallel,
        };

        // G = 1 once the state is rescaled
        let forces = AccelSet::new().with(NewtonianGravity {
            g: parameters.g,
            parallel: engine.parallel,
        });

        info!(
            "scenario: {} bodies, dt = {:.6e}, t_end = {:.6e} (simulation units), time factor = {:.6e} 1/s",
            bodies.len(),
            parameters.h0,
            parameters.t_end,
            scale.time_factor
        );

        Ok(Self {
            engine,
            parameters,
            scale,
            system: PhysicalSystem::new(System::new(bodies)),
            forces,
            output: cfg.output.into(),
        })
    }
}
