//! Physical diagnostics: energies, angular momentum, orbital periods
//!
//! Energy and angular momentum use the true gravitational constant and are
//! only meaningful in SI units, so the driver goes through
//! [`PhysicalSystem::measure`]. The free functions take plain body slices and
//! an explicit `g` so they can also be evaluated in simulation units (g = 1).

use rayon::prelude::*;

use crate::simulation::states::{Body, PhysicalSystem};

/// One step's worth of measured quantities, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub kinetic: f64,
    pub potential: f64,
    pub angular_momentum: f64,
}

impl Measurement {
    pub fn mechanical(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Euclidean norm of each velocity.
pub fn speeds(bodies: &[Body]) -> Vec<f64> {
    bodies.iter().map(|b| b.v.norm()).collect()
}

/// sum of 0.5 m |v|^2
pub fn kinetic_energy(bodies: &[Body], parallel: bool) -> f64 {
    let term = |b: &Body| {
        let s = b.v.norm();
        0.5 * b.m * s * s
    };
    if parallel {
        bodies.par_iter().map(term).sum()
    } else {
        bodies.iter().map(term).sum()
    }
}

/// -sum over i < j of g m_i m_j / d_ij
pub fn potential_energy(bodies: &[Body], g: f64, parallel: bool) -> f64 {
    let n = bodies.len();
    let row = |i: usize| -> f64 {
        let bi = &bodies[i];
        bodies[(i + 1)..]
            .iter()
            .map(|bj| -(g * bi.m * bj.m) / (bj.x - bi.x).norm())
            .sum()
    };
    if parallel {
        (0..n).into_par_iter().map(row).sum()
    } else {
        (0..n).map(row).sum()
    }
}

/// `(kinetic, potential)`
pub fn energies(bodies: &[Body], g: f64, parallel: bool) -> (f64, f64) {
    (kinetic_energy(bodies, parallel), potential_energy(bodies, g, parallel))
}

/// Scalar proxy for total angular momentum: sum of m |x| |v|.
///
/// This is not the cross product. It agrees with |L| only for motion
/// perpendicular to the position vector, which holds for the circular orbits
/// of the catalog and is what the recorded series is compared against.
pub fn total_angular_momentum(bodies: &[Body], parallel: bool) -> f64 {
    let term = |b: &Body| b.m * b.x.norm() * b.v.norm();
    if parallel {
        bodies.par_iter().map(term).sum()
    } else {
        bodies.iter().map(term).sum()
    }
}

impl PhysicalSystem {
    /// Energies and angular momentum using the SI gravitational constant `g`.
    pub fn measure(&self, g: f64, parallel: bool) -> Measurement {
        let (kinetic, potential) = energies(self.bodies(), g, parallel);
        Measurement {
            kinetic,
            potential,
            angular_momentum: total_angular_momentum(self.bodies(), parallel),
        }
    }
}

/// Coarse orbital period estimate per body.
///
/// Bodies start on the positive x-axis moving toward +y. The first time a
/// body's y-coordinate is negative at loop time `t`, its period is recorded as
/// `2 t`. Once non-zero, a period is never touched again.
#[derive(Debug, Clone)]
pub struct PeriodTracker {
    periods: Vec<f64>,
}

impl PeriodTracker {
    pub fn new(n: usize) -> Self {
        Self {
            periods: vec![0.0; n],
        }
    }

    pub fn detect(&mut self, bodies: &[Body], t: f64) {
        for (period, b) in self.periods.iter_mut().zip(bodies.iter()) {
            if b.x.y < 0.0 && *period == 0.0 {
                *period = 2.0 * t;
            }
        }
    }

    /// Zero means not yet detected.
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    pub fn into_periods(self) -> Vec<f64> {
        self.periods
    }
}
