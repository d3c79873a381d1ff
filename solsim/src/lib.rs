pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use error::SimError;

pub use simulation::states::{Body, SystemState, EnergyRecord, AccelField, NVec3};
pub use simulation::forces::{compute_acceleration, compute_acceleration_par, NewtonianGravity};
pub use simulation::energy::compute_energy;
pub use simulation::integrator::leapfrog_kdk;
pub use simulation::engine::{run, Engine};
pub use simulation::history::{History, Frame};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use visualization::viewer::run_viewer;

pub use benchmark::benchmark::{bench_force, bench_engine};
