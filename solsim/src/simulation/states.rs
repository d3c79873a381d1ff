//! Core state types for the N-body simulation.
//!
//! - `Body`        one body's mass, position and velocity (used for setup)
//! - `SystemState` positions and velocities of all bodies, mutated in place
//! - `AccelField`  per-body accelerations, recomputed every step
//! - `EnergyRecord` kinetic/potential pair
//!
//! Masses are kept apart from `SystemState` because they never change during a run.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// One acceleration vector per body, indexed like the bodies.
pub type AccelField = Vec<NVec3>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position [m]
    pub v: NVec3, // velocity [m/s]
    pub m: f64, // mass [kg]
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    pub x: Vec<NVec3>, // positions
    pub v: Vec<NVec3>, // velocities
}

impl SystemState {
    /// Split a body list into a state and its parallel mass vector
    pub fn from_bodies(bodies: &[Body]) -> (Self, Vec<f64>) {
        let state = SystemState {
            x: bodies.iter().map(|b| b.x).collect(),
            v: bodies.iter().map(|b| b.v).collect(),
        };
        let masses = bodies.iter().map(|b| b.m).collect();
        (state, masses)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Kinetic and potential energy of the system at one instant [J]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyRecord {
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergyRecord {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }

    pub fn is_finite(&self) -> bool {
        self.kinetic.is_finite() && self.potential.is_finite()
    }
}
