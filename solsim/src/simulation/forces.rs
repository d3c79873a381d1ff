//! Newtonian gravity for the n-body engine
//!
//! Direct O(N^2) sum over every ordered pair (i, j), i != j, with Plummer
//! style softening added in quadrature to the squared separation.

use rayon::prelude::*;

use crate::error::SimError;
use crate::simulation::states::{AccelField, NVec3};

/// Acceleration on body `i` from every other body.
///
/// `denom = (|d|^2 + softening^2)^(-3/2)` and `a_i += G * (d * denom) * m_j`
/// with `d = x_j - x_i`. A zero softened separation is reported instead of
/// dividing by zero.
fn acceleration_row(i: usize, positions: &[NVec3], masses: &[f64], g: f64, soft2: f64) -> Result<NVec3, SimError> {
    // xi: position of body i (the body being pulled)
    let xi = positions[i];

    // Running sum of the pulls on body i
    let mut a = NVec3::zeros();

    // Loop over every other body j, in index order
    for (j, (xj, mj)) in positions.iter().zip(masses.iter()).enumerate() {
        // No self-interaction
        if i == j {
            continue;
        }

        // d is the displacement vector from i to j,
        // so i feels a pull along +d
        let d = xj - xi;

        // Softened squared separation:
        // d2 = |d|^2 + softening^2
        let d2 = d.dot(&d) + soft2;

        // Two bodies on top of each other with no softening,
        // d2^(-3/2) would be a division by zero
        if d2 == 0.0 {
            return Err(SimError::NumericalDegeneracy { i: i.min(j), j: i.max(j) });
        }

        // 1 / |d_soft|^3
        let denom = d2.powf(-1.5);

        // Newton:
        // a_i += G * m_j * d / |d_soft|^3
        a += g * (d * denom) * *mj;
    }

    Ok(a)
}

fn check_lengths(positions: &[NVec3], masses: &[f64]) -> Result<(), SimError> {
    if positions.len() != masses.len() {
        return Err(SimError::invalid(format!(
            "{} positions but {} masses",
            positions.len(),
            masses.len()
        )));
    }
    Ok(())
}

/// Compute the acceleration of every body.
///
/// Pure function of its inputs. NaN or infinite inputs are not checked and
/// propagate into the result; only exact coincidence with zero softening is
/// turned into [`SimError::NumericalDegeneracy`]. Mismatched `positions` and
/// `masses` lengths are rejected as [`SimError::InvalidConfiguration`].
pub fn compute_acceleration(positions: &[NVec3], masses: &[f64], g: f64, softening: f64) -> Result<AccelField, SimError> {
    check_lengths(positions, masses)?;

    // softening enters squared, next to |d|^2
    let soft2 = softening * softening;

    // One row per body
    (0..positions.len())
        .map(|i| acceleration_row(i, positions, masses, g, soft2))
        .collect()
}

/// Same as [`compute_acceleration`] with rows spread over the rayon pool.
/// Each row sums in the same order, so the output is bit-identical.
pub fn compute_acceleration_par(positions: &[NVec3], masses: &[f64], g: f64, softening: f64) -> Result<AccelField, SimError> {
    check_lengths(positions, masses)?;
    let soft2 = softening * softening;

    // Rows are independent, rayon hands them out to the pool and
    // collect keeps them in body order
    (0..positions.len())
        .into_par_iter()
        .map(|i| acceleration_row(i, positions, masses, g, soft2))
        .collect()
}

/// Gravity model carried by a scenario: constant, softening, and whether to
/// evaluate rows in parallel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub softening: f64, // softening length [m]
    pub parallel: bool,
}

impl NewtonianGravity {
    /// Accelerations of all bodies at `positions`
    pub fn accelerations(&self, positions: &[NVec3], masses: &[f64]) -> Result<AccelField, SimError> {
        if self.parallel {
            compute_acceleration_par(positions, masses, self.g, self.softening)
        } else {
            compute_acceleration(positions, masses, self.g, self.softening)
        }
    }
}
