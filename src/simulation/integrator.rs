//! Fixed-step velocity-Verlet integrator for the N-body system
//!
//! Driven by an `AccelSet` and `Parameters`. Works on a `SimulationSystem`
//! only, so callers cannot integrate a state that is still in SI units.

use super::forces::AccelSet;
use super::params::{AnchorHalfKick, Parameters};
use super::states::{NVec2, SimulationSystem};

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// and `sys.t` in-place based on `params.h0`
pub fn verlet_integrator(sim: &mut SimulationSystem, forces: &AccelSet, params: &Parameters) {
    let sys = sim.as_system_mut();
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2
    let half_dt2 = 0.5 * dt * dt;

    // a_n at the current positions
    let mut a_old = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_old);

    // Half-step velocity buffer: w = v_n + (1/2 * dt) * a_n
    // Entry 0 stays zero under AnchorHalfKick::Skip
    let first = match params.anchor {
        AnchorHalfKick::Skip => 1,
        AnchorHalfKick::Include => 0,
    };
    let mut w = vec![NVec2::zeros(); n];
    for i in first..n {
        w[i] = sys.bodies[i].v + half_dt * a_old[i];
    }

    // x_n+1 = x_n + dt v_n + (1/2 * dt^2) a_n, every body including 0
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.x += dt * b.v + half_dt2 * *a;
    }

    // Increment the system time by one full step
    sys.t += dt;

    // a_n+1 at the updated positions
    let mut a_new = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a_new);

    // v_n+1 = w + 0.5 dt a_n+1
    for ((b, w), a) in sys.bodies.iter_mut().zip(w.iter()).zip(a_new.iter()) {
        b.v = *w + half_dt * *a;
    }
}
