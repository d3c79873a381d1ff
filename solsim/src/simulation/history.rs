//! Recorded time series of a run
//!
//! Storage is allocated once for `steps + 1` entries (step 0 is the initial
//! state) and filled in order by the engine. Everything public is read-only,
//! which is all a plotting or viewing layer needs.

use std::mem::size_of;

use crate::error::SimError;
use crate::simulation::states::{EnergyRecord, NVec3};

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    n_bodies: usize,
    dt: f64,
    recorded: usize,
    positions: Vec<NVec3>, // (steps + 1) * n_bodies, row per step
    energies: Vec<EnergyRecord>,
}

/// One recorded step, borrowed from a [`History`]
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub step: usize,
    pub time: f64,
    pub positions: &'a [NVec3],
    pub energy: EnergyRecord,
}

impl History {
    /// Allocate room for `steps + 1` entries, or fail if that many cannot be addressed
    pub(crate) fn with_capacity(n_bodies: usize, steps: usize, dt: f64) -> Result<Self, SimError> {
        let too_large = || SimError::invalid(format!("history of {} steps x {} bodies is too large", steps, n_bodies));

        let frames = steps.checked_add(1).ok_or_else(too_large)?;
        let cells = frames.checked_mul(n_bodies).ok_or_else(too_large)?;
        // a Vec may not hold more than isize::MAX bytes
        let bytes = cells.checked_mul(size_of::<NVec3>()).ok_or_else(too_large)?;
        if bytes > isize::MAX as usize {
            return Err(too_large());
        }

        Ok(Self {
            n_bodies,
            dt,
            recorded: 0,
            positions: vec![NVec3::zeros(); cells],
            energies: vec![EnergyRecord::default(); frames],
        })
    }

    /// Store entry `step`. Entries must be written in order starting at 0.
    pub(crate) fn record(&mut self, step: usize, positions: &[NVec3], energy: EnergyRecord) {
        debug_assert_eq!(step, self.recorded);
        debug_assert_eq!(positions.len(), self.n_bodies);
        let start = step * self.n_bodies;
        self.positions[start..start + self.n_bodies].copy_from_slice(positions);
        self.energies[step] = energy;
        self.recorded = step + 1;
    }

    /// Number of recorded entries (`steps + 1` after a completed run)
    pub fn len(&self) -> usize {
        self.recorded
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    pub fn n_bodies(&self) -> usize {
        self.n_bodies
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Positions of all bodies at `step`
    pub fn positions(&self, step: usize) -> &[NVec3] {
        assert!(step < self.recorded, "step {} not recorded (len {})", step, self.recorded);
        let start = step * self.n_bodies;
        &self.positions[start..start + self.n_bodies]
    }

    pub fn energy(&self, step: usize) -> EnergyRecord {
        assert!(step < self.recorded, "step {} not recorded (len {})", step, self.recorded);
        self.energies[step]
    }

    /// Elapsed time at `step`, i.e. `step * dt`
    pub fn time(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }

    pub fn frame(&self, step: usize) -> Frame<'_> {
        Frame {
            step,
            time: self.time(step),
            positions: self.positions(step),
            energy: self.energy(step),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Frame<'_>> + '_ {
        (0..self.recorded).map(move |k| self.frame(k))
    }

    /// Position series of one body
    pub fn trail(&self, body: usize) -> impl Iterator<Item = NVec3> + '_ {
        assert!(body < self.n_bodies, "body {} out of range", body);
        self.positions[..self.recorded * self.n_bodies]
            .chunks_exact(self.n_bodies.max(1))
            .map(move |row| row[body])
    }

    pub fn total_energies(&self) -> Vec<f64> {
        self.energies[..self.recorded].iter().map(|e| e.total()).collect()
    }

    /// `|E_k - E_0| / |E_0|`, or the absolute change `|E_k - E_0|` when `E_0` is zero
    pub fn relative_energy_drift(&self, step: usize) -> f64 {
        let e0 = self.energy(0).total();
        let change = (self.energy(step).total() - e0).abs();
        if e0 == 0.0 {
            return change;
        }
        change / e0.abs()
    }

    pub fn max_relative_energy_drift(&self) -> f64 {
        (0..self.recorded)
            .map(|k| self.relative_energy_drift(k))
            .fold(0.0, f64::max)
    }

    /// Mass-weighted mean position at `step`
    pub fn center_of_mass(&self, step: usize, masses: &[f64]) -> NVec3 {
        let total: f64 = masses.iter().sum();
        let weighted = self
            .positions(step)
            .iter()
            .zip(masses.iter())
            .fold(NVec3::zeros(), |acc, (x, m)| acc + x * *m);
        weighted / total
    }

    /// Scan the recorded entries for NaN or infinite values
    pub fn validate(&self) -> Result<(), SimError> {
        for k in 0..self.recorded {
            if let Some(body) = self.positions(k).iter().position(|x| !x.iter().all(|c| c.is_finite())) {
                return Err(SimError::NonFinite { step: k, body: Some(body) });
            }
            if !self.energies[k].is_finite() {
                return Err(SimError::NonFinite { step: k, body: None });
            }
        }
        Ok(())
    }
}
