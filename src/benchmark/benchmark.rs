use std::time::Instant;

use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity};
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::params::{AnchorHalfKick, Parameters};
use crate::simulation::states::{Body, NVec2, SimulationSystem, System};

/// Deterministic ring-ish body set in simulation units, no rand needed
fn synthetic_system(n: usize) -> System {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let r = 1.0 + 0.05 * i_f;
            let phase = i_f * 0.37;
            Body {
                name: format!("b{i}"),
                x: NVec2::new(r * phase.cos(), r * phase.sin()),
                v: NVec2::new(-phase.sin(), phase.cos()) / r.sqrt(),
                m: if i == 0 { 1.0 } else { 1.0e-6 },
            }
        })
        .collect();
    System::new(bodies)
}

pub fn bench_gravity(ns: &[usize]) {
    for &n in ns {
        let sys = synthetic_system(n);
        let mut out = vec![NVec2::zeros(); n];

        let serial = NewtonianGravity::simulation_units(false);
        let parallel = NewtonianGravity::simulation_units(true);

        // Warm up
        serial.acceleration(0.0, &sys, &mut out);
        parallel.acceleration(0.0, &sys, &mut out);

        let t0 = Instant::now();
        serial.acceleration(0.0, &sys, &mut out);
        let dt_serial = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        parallel.acceleration(0.0, &sys, &mut out);
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, serial = {:8.6} s, parallel = {:8.6} s", dt_serial, dt_parallel);
    }
}

pub fn bench_verlet(ns: &[usize], steps: usize) {
    let params = Parameters::new(1.0e-3, f64::INFINITY).with_anchor(AnchorHalfKick::Include);

    for &n in ns {
        let template = synthetic_system(n);
        let mut per_step = [0.0; 2];

        for (slot, parallel) in [false, true].into_iter().enumerate() {
            let mut sim = SimulationSystem::new(template.clone());
            let forces = AccelSet::new().with(NewtonianGravity::simulation_units(parallel));

            // Warm-up
            verlet_integrator(&mut sim, &forces, &params);

            let t0 = Instant::now();
            for _ in 0..steps {
                verlet_integrator(&mut sim, &forces, &params);
            }
            per_step[slot] = t0.elapsed().as_secs_f64() / steps.max(1) as f64;
        }

        println!(
            "N = {n:5}, verlet serial = {:8.6} s/step, parallel = {:8.6} s/step",
            per_step[0], per_step[1]
        );
    }
}
