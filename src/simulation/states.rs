//! Core state types for the N-body simulation.
//!
//! - `Body` / `System` using `NVec2` (2d)
//! - `PhysicalSystem` / `SimulationSystem`: the same `System`, tagged with the
//!   unit system its numbers are currently expressed in
//!
//! A `System` holds the list of bodies and the current simulation time `t`.
//! Body identity is its index in `bodies`; the list never grows or shrinks.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // reporting only
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass, strictly positive
}

impl Body {
    pub fn new(name: impl Into<String>, m: f64, x: [f64; 2], v: [f64; 2]) -> Self {
        Self {
            name: name.into(),
            x: NVec2::new(x[0], x[1]),
            v: NVec2::new(v[0], v[1]),
            m,
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // 2d collection of bodies
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// A [`System`] whose masses are in kg, positions in m and velocities in m/s.
///
/// Diagnostics that involve the true gravitational constant only accept this
/// type. Converting to [`SimulationSystem`] goes through
/// [`PhysicalSystem::into_simulation`].
#[derive(Debug, Clone)]
pub struct PhysicalSystem(System);

/// A [`System`] in dimensionless simulation units (solar masses, AU, and a
/// time unit chosen so that G = 1). The integrator only accepts this type.
#[derive(Debug, Clone)]
pub struct SimulationSystem(System);

impl PhysicalSystem {
    pub fn new(system: System) -> Self {
        Self(system)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.0.bodies
    }

    pub fn time(&self) -> f64 {
        self.0.t
    }

    pub fn as_system(&self) -> &System {
        &self.0
    }

    pub(crate) fn system_mut(&mut self) -> &mut System {
        &mut self.0
    }

    pub fn into_inner(self) -> System {
        self.0
    }
}

impl SimulationSystem {
    /// Wrap a system whose values are already in simulation units.
    pub fn new(system: System) -> Self {
        Self(system)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.0.bodies
    }

    pub fn time(&self) -> f64 {
        self.0.t
    }

    pub fn as_system(&self) -> &System {
        &self.0
    }

    pub fn as_system_mut(&mut self) -> &mut System {
        &mut self.0
    }

    pub fn into_inner(self) -> System {
        self.0
    }
}
