//! Energy diagnostic used to check conservation over a run

use crate::simulation::states::{EnergyRecord, NVec3};

/// Kinetic and potential energy of the system.
///
/// - kinetic   = 0.5 * sum_i m_i |v_i|^2
/// - potential = G * sum_{i<j} -m_i m_j / |x_i - x_j|
///
/// Each unordered pair is counted once, self pairs never. Softening is not
/// applied here, so coincident bodies give an infinite potential which is
/// passed through unchanged.
///
/// # Panics
///
/// If `positions`, `velocities` and `masses` differ in length.
pub fn compute_energy(positions: &[NVec3], velocities: &[NVec3], masses: &[f64], g: f64) -> EnergyRecord {
    assert!(
        positions.len() == masses.len() && velocities.len() == masses.len(),
        "compute_energy: {} positions, {} velocities, {} masses",
        positions.len(),
        velocities.len(),
        masses.len()
    );

    // Kinetic: 0.5 * m * |v|^2 summed over all bodies
    let kinetic = 0.5
        * velocities
            .iter()
            .zip(masses.iter())
            .map(|(v, m)| m * v.norm_squared())
            .sum::<f64>();

    // Potential: upper triangle only (j > i), so every pair is counted once
    // and the diagonal is skipped
    let n = positions.len();
    let mut pair_sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            // separation |x_i - x_j|, 0 for coincident bodies gives -inf
            let r = (positions[i] - positions[j]).norm();
            pair_sum += -(masses[i] * masses[j]) / r;
        }
    }

    EnergyRecord {
        kinetic,
        potential: g * pair_sum,
    }
}
