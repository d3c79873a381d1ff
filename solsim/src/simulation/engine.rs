//! Simulation driver
//!
//! Owns the history buffers, runs the leapfrog loop for the configured number
//! of steps and records positions and energies after every step.

use log::{debug, info};

use crate::error::SimError;
use super::energy::compute_energy;
use super::forces::NewtonianGravity;
use super::history::History;
use super::integrator::leapfrog_kdk;
use super::params::Parameters;
use super::states::{NVec3, SystemState};

/// Runtime engine settings that do not change the numerical result
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub parallel: bool, // evaluate force rows on the rayon pool
    pub log_every: usize, // progress log cadence in steps, 0 = off
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            parallel: false,
            log_every: 100,
        }
    }
}

/// Run the simulation from `initial` for `params.steps` steps.
///
/// The returned history has `steps + 1` entries; entry 0 is the initial state.
/// The loop never stops early. A coincidence of two bodies with zero softening
/// aborts with [`SimError::NumericalDegeneracy`]; other non-finite values are
/// left in the history for [`History::validate`] to find.
pub fn run(initial: &SystemState, masses: &[f64], params: &Parameters, engine: &Engine) -> Result<History, SimError> {
    check_shapes(initial, masses)?;
    params.validate()?;

    let gravity = NewtonianGravity {
        g: params.g,
        softening: params.softening,
        parallel: engine.parallel,
    };

    let mut history = History::with_capacity(masses.len(), params.steps, params.dt)?;
    let mut state = initial.clone();

    let mut accel = gravity.accelerations(&state.x, masses)?;
    let e0 = compute_energy(&state.x, &state.v, masses, params.g);
    history.record(0, &state.x, e0);

    info!(
        "run: {} bodies, dt = {} s, {} steps ({} s simulated)",
        masses.len(),
        params.dt,
        params.steps,
        params.duration()
    );
    debug!("run: initial energy kin = {:e} J, pot = {:e} J", e0.kinetic, e0.potential);

    for k in 1..=params.steps {
        leapfrog_kdk(&mut state, &mut accel, masses, &gravity, params.dt)?;
        let energy = compute_energy(&state.x, &state.v, masses, params.g);
        history.record(k, &state.x, energy);

        if engine.log_every > 0 && k % engine.log_every == 0 {
            info!(
                "step {}/{}: E = {:e} J, drift = {:.3e}",
                k,
                params.steps,
                energy.total(),
                history.relative_energy_drift(k)
            );
        }
    }

    Ok(history)
}

fn check_shapes(state: &SystemState, masses: &[f64]) -> Result<(), SimError> {
    let n = masses.len();
    if n < 1 {
        return Err(SimError::invalid("at least one body is required"));
    }
    if state.x.len() != n || state.v.len() != n {
        return Err(SimError::invalid(format!(
            "length mismatch: {} masses, {} positions, {} velocities",
            n,
            state.x.len(),
            state.v.len()
        )));
    }
    if let Some(i) = masses.iter().position(|m| !m.is_finite() || *m <= 0.0) {
        return Err(SimError::invalid(format!("mass of body {} must be finite and > 0, got {}", i, masses[i])));
    }
    let finite = |v: &NVec3| v.iter().all(|c| c.is_finite());
    if let Some(i) = (0..n).find(|&i| !finite(&state.x[i]) || !finite(&state.v[i])) {
        return Err(SimError::invalid(format!("initial state of body {} is not finite", i)));
    }
    Ok(())
}
