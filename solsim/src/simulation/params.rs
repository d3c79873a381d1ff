//! Numerical and physical parameters for a run
//!
//! `Parameters` holds the gravitational constant, softening length, fixed
//! time step and the step count derived from the end time.

use crate::error::SimError;

/// SI constants used by the built-in solar system scenario
pub mod consts {
    pub const G_SI: f64 = 6.67428e-11; // gravitational constant [m^3 kg^-1 s^-2]
    pub const AU: f64 = 149.6e6 * 1000.0; // astronomical unit [m]
    pub const SOLAR_MASS: f64 = 1.99e30; // [kg]
    pub const DAY: f64 = 24.0 * 3600.0; // [s]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub softening: f64, // softening length [m]
    pub dt: f64, // fixed step size [s]
    pub steps: usize, // number of steps, fixed for the run
}

impl Parameters {
    /// Build parameters from an end time. The step count is `floor(t_end / dt)`.
    pub fn from_duration(g: f64, softening: f64, dt: f64, t_end: f64) -> Result<Self, SimError> {
        if !t_end.is_finite() || t_end < 0.0 {
            return Err(SimError::invalid(format!("t_end must be finite and >= 0, got {}", t_end)));
        }
        check_step(dt)?;
        // `as usize` saturates, so too many steps has to be caught before the cast
        let ratio = (t_end / dt).floor();
        if ratio >= usize::MAX as f64 {
            return Err(SimError::invalid(format!("t_end / dt = {:e} steps is too many", ratio)));
        }
        Self::new(g, softening, dt, ratio as usize)
    }

    pub fn new(g: f64, softening: f64, dt: f64, steps: usize) -> Result<Self, SimError> {
        let params = Parameters { g, softening, dt, steps };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.g.is_finite() || self.g <= 0.0 {
            return Err(SimError::invalid(format!("G must be finite and > 0, got {}", self.g)));
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(SimError::invalid(format!("softening must be finite and >= 0, got {}", self.softening)));
        }
        if self.steps.checked_add(1).is_none() {
            return Err(SimError::invalid(format!("step count {} is too large", self.steps)));
        }
        check_step(self.dt)
    }

    /// Simulated time covered by the run
    pub fn duration(&self) -> f64 {
        self.steps as f64 * self.dt
    }
}

fn check_step(dt: f64) -> Result<(), SimError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimError::invalid(format!("dt must be finite and > 0, got {}", dt)));
    }
    Ok(())
}
