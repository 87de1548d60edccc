//! Fixed-length simulation loop
//!
//! Each iteration, with the state in simulation units on entry:
//! 1. advance one velocity-Verlet step
//! 2. record positions (still in simulation units)
//! 3. convert to SI, record energies and angular momentum
//! 4. convert back to simulation units
//! 5. update period detection with the pre-step loop time
//!
//! The loop runs while the pre-step time is below `t_end`. All parallel
//! regions execute inside one worker pool sized by `Engine::threads`.

use std::io::Write;

use log::{debug, info};
use thiserror::Error;

use crate::recording::recorder::{Recorder, RecorderError};
use crate::simulation::diagnostics::PeriodTracker;
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::SimulationSystem;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// What a completed run leaves behind besides the output streams.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub steps: usize,
    pub final_time: f64, // simulation units
    pub periods: Vec<(String, f64)>, // simulation units, zero = not detected
    pub final_state: SimulationSystem,
}

const PROGRESS_EVERY: usize = 10_000;

/// Run `scenario` to completion, appending to `recorder`.
///
/// The recorder is not flushed; call [`Recorder::finish`] afterwards.
pub fn run<W: Write + Send>(scenario: Scenario, recorder: &mut Recorder<W>) -> Result<RunSummary, SimulationError> {
    let pool = scenario.engine.thread_pool()?;
    info!("worker pool: {} threads, parallel = {}", scenario.engine.threads, scenario.engine.parallel);

    let Scenario {
        engine,
        parameters,
        scale,
        system,
        forces,
        ..
    } = scenario;

    pool.install(move || -> Result<RunSummary, SimulationError> {
        let mut sim = system.into_simulation(&scale);
        let mut periods = PeriodTracker::new(sim.bodies().len());
        let mut steps = 0usize;

        while sim.time() < parameters.t_end {
            let t = sim.time();

            verlet_integrator(&mut sim, &forces, &parameters);
            recorder.write_positions(sim.bodies())?;

            let physical = sim.into_physical(&scale);
            let m = physical.measure(scale.g, engine.parallel);
            recorder.write_energies(&m)?;
            recorder.write_angular_momentum(m.angular_momentum)?;
            sim = physical.into_simulation(&scale);

            periods.detect(sim.bodies(), t);

            steps += 1;
            if steps % PROGRESS_EVERY == 0 {
                debug!(
                    "step {steps}: t = {:.3} yr, E = {:.6e} J",
                    scale.sim_to_years(sim.time()),
                    m.mechanical()
                );
            }
        }

        let periods = sim
            .bodies()
            .iter()
            .map(|b| b.name.clone())
            .zip(periods.into_periods())
            .collect();

        let summary = RunSummary {
            steps,
            final_time: sim.time(),
            periods,
            final_state: sim,
        };
        Ok(summary)
    })
}
