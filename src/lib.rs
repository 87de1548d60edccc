pub mod simulation;
pub mod configuration;
pub mod recording;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2, PhysicalSystem, SimulationSystem};
pub use simulation::units::UnitScale;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, pair_force, pairwise_forces};
pub use simulation::integrator::verlet_integrator;
pub use simulation::params::{AnchorHalfKick, Parameters};
pub use simulation::diagnostics::{Measurement, PeriodTracker};
pub use simulation::scenario::Scenario;
pub use simulation::driver::{run, RunSummary, SimulationError};

pub use configuration::config::{EngineConfig, ParametersConfig, OutputConfig, BodyConfig, ScenarioConfig, ConfigError, load_scenario};

pub use recording::recorder::{Recorder, RecorderError, OutputPaths};

pub use benchmark::benchmark::{bench_gravity, bench_verlet};
