//! Conversion between physical (SI) units and simulation units
//!
//! Simulation units measure mass in solar masses, length in astronomical
//! units, and time in units of `1 / time_factor` seconds, where
//! `time_factor = sqrt(G * M_ref / L_ref^3)`. In that system G = 1.
//!
//! Normalization happens in two stages. `to_simulation_length` divides both
//! positions and velocities by `L_ref`, which leaves velocities in AU/s.
//! `rescale_velocity_by_time_factor` then divides velocities by
//! `time_factor`, turning AU/s into AU per simulation time unit.

use crate::simulation::states::{Body, PhysicalSystem, SimulationSystem};

pub const G_SI: f64 = 6.67430e-11; // m^3 kg^-1 s^-2
pub const AU: f64 = 1.496e11; // m
pub const SOLAR_MASS: f64 = 1.989e30; // kg
pub const DAY: f64 = 86400.0; // s
pub const YEAR_DAYS: f64 = 365.25;

/// Reference quantities for one run, fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    pub reference_mass: f64,
    pub reference_length: f64,
    pub g: f64,
    pub time_factor: f64,
}

impl UnitScale {
    pub fn new(reference_mass: f64, reference_length: f64, g: f64) -> Self {
        let time_factor = (g * reference_mass / reference_length.powi(3)).sqrt();
        Self {
            reference_mass,
            reference_length,
            g,
            time_factor,
        }
    }

    /// Solar mass, 1 AU and the SI gravitational constant
    pub fn solar() -> Self {
        Self::new(SOLAR_MASS, AU, G_SI)
    }

    pub fn days_to_sim(&self, days: f64) -> f64 {
        days * DAY * self.time_factor
    }

    pub fn years_to_sim(&self, years: f64) -> f64 {
        self.days_to_sim(years * YEAR_DAYS)
    }

    pub fn sim_to_years(&self, t: f64) -> f64 {
        t / (self.time_factor * DAY * YEAR_DAYS)
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::solar()
    }
}

/// Divide every mass by the reference mass.
pub fn normalize_mass(bodies: &mut [Body], scale: &UnitScale) {
    for b in bodies.iter_mut() {
        b.m /= scale.reference_mass;
    }
}

/// Divide every position and velocity component by the reference length.
pub fn to_simulation_length(bodies: &mut [Body], scale: &UnitScale) {
    for b in bodies.iter_mut() {
        b.x /= scale.reference_length;
        b.v /= scale.reference_length;
    }
}

pub fn rescale_velocity_by_time_factor(bodies: &mut [Body], time_factor: f64) {
    for b in bodies.iter_mut() {
        b.v /= time_factor;
    }
}

/// Inverse of `normalize_mass` followed by `to_simulation_length`.
pub fn to_physical_units(bodies: &mut [Body], scale: &UnitScale) {
    for b in bodies.iter_mut() {
        b.m *= scale.reference_mass;
        b.x *= scale.reference_length;
        b.v *= scale.reference_length;
    }
}

pub fn undo_velocity_time_rescale(bodies: &mut [Body], time_factor: f64) {
    for b in bodies.iter_mut() {
        b.v *= time_factor;
    }
}

impl PhysicalSystem {
    /// Normalize mass, length and velocity into simulation units.
    pub fn into_simulation(mut self, scale: &UnitScale) -> SimulationSystem {
        let sys = self.system_mut();
        normalize_mass(&mut sys.bodies, scale);
        to_simulation_length(&mut sys.bodies, scale);
        rescale_velocity_by_time_factor(&mut sys.bodies, scale.time_factor);
        SimulationSystem::new(self.into_inner())
    }
}

impl SimulationSystem {
    /// Exact inverse of [`PhysicalSystem::into_simulation`], up to rounding.
    pub fn into_physical(mut self, scale: &UnitScale) -> PhysicalSystem {
        let sys = self.as_system_mut();
        to_physical_units(&mut sys.bodies, scale);
        undo_velocity_time_rescale(&mut sys.bodies, scale.time_factor);
        PhysicalSystem::new(self.into_inner())
    }
}
