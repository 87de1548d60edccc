//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, a set that sums several terms, and direct
//! Newtonian gravity. Gravity computes the force once per unordered pair and
//! applies it to both bodies with opposite signs, then divides each body's
//! accumulated force by its mass.

use rayon::prelude::*;

use crate::simulation::states::{Body, NVec2, System};

/// Collection of 2D acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }

    /// Convenience wrapper returning a freshly allocated acceleration buffer
    pub fn compute_accelerations(&self, sys: &System) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); sys.len()];
        self.accumulate_accels(sys.t, sys, &mut out);
        out
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for 2D acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Gravitational force exerted on `a` by `b`: `g * m_a * m_b / d^2`, pointing
/// from `a` toward `b`.
///
/// The bodies must not coincide. `pair_force(b, a, g)` is the exact negation of
/// `pair_force(a, b, g)`.
#[inline]
pub fn pair_force(a: &Body, b: &Body, g: f64) -> NVec2 {
    let d = b.x - a.x;
    let dist = (d.x * d.x + d.y * d.y).sqrt();
    // m_a * m_b first so the magnitude is bitwise symmetric in (a, b)
    let f = g * (a.m * b.m) / (dist * dist);
    NVec2::new(f * d.x / dist, f * d.y / dist)
}

/// Net gravitational force on every body, one `pair_force` per unordered pair.
///
/// The parallel path gives each worker its own accumulator buffer and merges
/// them afterwards; results may differ from the serial path in the last bits.
pub fn pairwise_forces(bodies: &[Body], g: f64, parallel: bool) -> Vec<NVec2> {
    let n = bodies.len();
    if !parallel {
        let mut forces = vec![NVec2::zeros(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let f = pair_force(&bodies[i], &bodies[j], g);
                forces[i] += f;
                forces[j] -= f;
            }
        }
        return forces;
    }

    (0..n)
        .into_par_iter()
        .fold(
            || vec![NVec2::zeros(); n],
            |mut acc, i| {
                for j in (i + 1)..n {
                    let f = pair_force(&bodies[i], &bodies[j], g);
                    acc[i] += f;
                    acc[j] -= f;
                }
                acc
            },
        )
        .reduce(
            || vec![NVec2::zeros(); n],
            |mut a, b| {
                for (lhs, rhs) in a.iter_mut().zip(b.iter()) {
                    *lhs += *rhs;
                }
                a
            },
        )
}

/// 2D Newtonian gravity, direct O(N^2 / 2) pair sum without softening.
///
/// `g` is 1 when positions and masses are in simulation units.
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub parallel: bool, // use the rayon fold/reduce path
}

impl NewtonianGravity {
    /// Gravity in simulation units (G = 1)
    pub fn simulation_units(parallel: bool) -> Self {
        Self { g: 1.0, parallel }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        if sys.bodies.is_empty() { // No bodies, return
            return;
        }

        let forces = pairwise_forces(&sys.bodies, self.g, self.parallel);

        // a_k = F_k / m_k
        if self.parallel {
            out.par_iter_mut()
                .zip(forces.par_iter())
                .zip(sys.bodies.par_iter())
                .for_each(|((a, f), b)| *a += *f / b.m);
        } else {
            for ((a, f), b) in out.iter_mut().zip(forces.iter()).zip(sys.bodies.iter()) {
                *a += *f / b.m;
            }
        }
    }
}
