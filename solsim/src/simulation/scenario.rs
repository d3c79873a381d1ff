//! Build fully-initialized simulation scenarios
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing the engine settings, validated parameters, initial state and
//! masses. A built-in solar system preset is also provided.

use bevy::prelude::Resource;
use log::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::engine::{self, Engine};
use crate::simulation::history::History;
use crate::simulation::params::consts::{AU, DAY, G_SI, SOLAR_MASS};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, SystemState};

/// Runtime bundle for one simulation run
#[derive(Debug, Clone, Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub state: SystemState,
    pub masses: Vec<f64>,
    pub names: Vec<String>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        if cfg.bodies.is_empty() {
            return Err(SimError::invalid("scenario has no bodies"));
        }

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| Body {
            x: NVec3::from(bc.x),
            v: NVec3::from(bc.v),
            m: bc.m,
        }).collect();

        let names = cfg.bodies.iter().enumerate()
            .map(|(i, bc)| bc.name.clone().unwrap_or_else(|| format!("body{}", i)))
            .collect();

        let p = cfg.parameters;
        let parameters = match (p.steps, p.t_end) {
            (Some(steps), _) => Parameters::new(p.G, p.softening, p.dt, steps)?,
            (None, Some(t_end)) => Parameters::from_duration(p.G, p.softening, p.dt, t_end)?,
            (None, None) => return Err(SimError::invalid("parameters need either `steps` or `t_end`")),
        };

        let engine = Engine {
            parallel: cfg.engine.parallel,
            log_every: cfg.engine.log_every.unwrap_or(100),
        };

        Self::from_bodies(&bodies, names, parameters, engine)
    }

    /// Assemble a scenario from runtime bodies, validating masses and state
    pub fn from_bodies(bodies: &[Body], names: Vec<String>, parameters: Parameters, engine: Engine) -> Result<Self, SimError> {
        if bodies.is_empty() {
            return Err(SimError::invalid("scenario has no bodies"));
        }
        if names.len() != bodies.len() {
            return Err(SimError::invalid(format!("{} names for {} bodies", names.len(), bodies.len())));
        }
        if let Some((i, b)) = bodies.iter().enumerate().find(|(_, b)| !b.m.is_finite() || b.m <= 0.0) {
            return Err(SimError::invalid(format!("mass of body {} must be finite and > 0, got {}", i, b.m)));
        }
        if let Some(i) = bodies.iter().position(|b| !b.x.iter().chain(b.v.iter()).all(|c| c.is_finite())) {
            return Err(SimError::invalid(format!("initial state of body {} is not finite", i)));
        }
        parameters.validate()?;

        let (state, masses) = SystemState::from_bodies(bodies);
        debug!("scenario: {} bodies, {} steps of {} s", bodies.len(), parameters.steps, parameters.dt);

        Ok(Self {
            engine,
            parameters,
            state,
            masses,
            names,
        })
    }

    /// Sun and nine planetary bodies lined up on +x, moving along +y.
    /// One day steps over 1500 days, no softening.
    pub fn solar_system() -> Result<Self, SimError> {
        // (name, mass [kg], distance [AU], speed [m/s])
        const PLANETS: [(&str, f64, f64, f64); 10] = [
            ("sun", SOLAR_MASS, 0.0, 0.0),
            ("mercury", 0.33e24, 0.47, 38.86e3),
            ("venus", 4.87e24, 0.728, 34.79e3),
            ("earth", 5.97e24, 1.02, 29.29e3),
            ("mars", 0.642e24, 1.67, 21.97e3),
            ("jupiter", 1898e24, 5.45, 12.44e3),
            ("saturn", 568e24, 10.0, 9.09e3),
            ("uranus", 86.8e24, 20.1, 6.80e3),
            ("neptune", 102e24, 30.3, 5.37e3),
            ("pluto", 0.0130e24, 49.9, 3.71e3),
        ];

        let bodies: Vec<Body> = PLANETS.iter().map(|&(_, m, r, s)| Body {
            x: NVec3::new(r * AU, 0.0, 0.0),
            v: NVec3::new(0.0, s, 0.0),
            m,
        }).collect();
        let names = PLANETS.iter().map(|p| p.0.to_string()).collect();

        let parameters = Parameters::from_duration(G_SI, 0.0, DAY, 1500.0 * DAY)?;
        Self::from_bodies(&bodies, names, parameters, Engine::default())
    }

    pub fn run(&self) -> Result<History, SimError> {
        engine::run(&self.state, &self.masses, &self.parameters, &self.engine)
    }
}
