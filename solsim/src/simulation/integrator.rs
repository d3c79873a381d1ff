//! Fixed-step kick-drift-kick leapfrog
//!
//! One force evaluation per step: the acceleration from the end of the
//! previous step is threaded in by the caller and replaced on return.

use crate::error::SimError;
use super::forces::NewtonianGravity;
use super::states::{AccelField, SystemState};

/// Advance `state` by one step of size `dt`.
///
/// `accel` must hold the accelerations at the current positions. On success
/// it holds the accelerations at the new positions, ready for the next call.
/// On error the state has already been kicked and drifted and should be
/// discarded.
pub fn leapfrog_kdk(
    state: &mut SystemState,
    accel: &mut AccelField,
    masses: &[f64],
    gravity: &NewtonianGravity,
    dt: f64,
) -> Result<(), SimError> {
    let half_dt = 0.5 * dt; // half step dt/2, each kick uses half the step

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    // a_n is the acceleration left over from the previous step (or the initial one)
    for (v, a) in state.v.iter_mut().zip(accel.iter()) {
        *v += half_dt * *a;
    }

    // Drift: now that velocities are at the half step, move positions a full step
    // x_n+1 = x_n + dt * v_n+1/2
    for (x, v) in state.x.iter_mut().zip(state.v.iter()) {
        *x += dt * *v;
    }

    // Recompute accelerations at the new positions x_n+1, the only force
    // evaluation of the step. This replaces the caller's buffer so it is
    // ready for the next call
    *accel = gravity.accelerations(&state.x, masses)?;

    // Second kick: finish the velocity update with the new accelerations
    // v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (v, a) in state.v.iter_mut().zip(accel.iter()) {
        *v += half_dt * *a;
    }

    Ok(())
}
