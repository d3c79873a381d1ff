//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – runtime options that do not change the result
//! - [`ParametersConfig`] – physical constants and the fixed time step
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   parallel: false          # rayon force rows
//!   log_every: 100           # progress log cadence in steps
//!
//! parameters:
//!   G: 6.67428e-11           # gravitational constant
//!   softening: 0.0           # softening length [m]
//!   dt: 86400.0              # step size [s]
//!   t_end: 31536000.0        # end time [s], or give `steps` directly
//!
//! bodies:
//!   - name: sun
//!     m: 1.0e30
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!   - name: earth
//!     m: 1.0e24
//!     x: [1.496e11, 0.0, 0.0]
//!     v: [0.0, 29780.0, 0.0]
//! ```

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: bool, // `true` - force rows computed on the rayon pool
    pub log_every: Option<usize>, // progress logging cadence, defaults to 100
}

/// Physical constants and step control for a scenario
#[derive(Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub softening: f64, // softening length, 0 = pure Newtonian
    pub dt: f64, // fixed time step
    pub t_end: Option<f64>, // end time, step count = floor(t_end / dt)
    pub steps: Option<usize>, // explicit step count, wins over t_end
}

/// Configuration for a single body’s initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: Option<String>,
    pub m: f64, // mass
    pub x: [f64; 3], // initial position
    pub v: [f64; 3], // initial velocity
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}
