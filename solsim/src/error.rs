//! Error types for the solar system simulator.
//!
//! Configuration problems are caught once, before any stepping. Numerical
//! problems are either detected in the force loop (coincident bodies with no
//! softening) or found afterwards by [`History::validate`](crate::History::validate).

use std::fmt;

/// Errors that can occur while building or running a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The scenario cannot be run as given (no bodies, bad mass, bad step, ...).
    InvalidConfiguration(String),
    /// Two distinct bodies sit at zero softened separation.
    NumericalDegeneracy { i: usize, j: usize },
    /// A NaN or infinite value was found in the recorded history.
    NonFinite { step: usize, body: Option<usize> },
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            SimError::NumericalDegeneracy { i, j } => write!(
                f,
                "Bodies {} and {} coincide with zero softening; acceleration is undefined",
                i, j
            ),
            SimError::NonFinite { step, body: Some(b) } => {
                write!(f, "Non-finite position for body {} at step {}", b, step)
            }
            SimError::NonFinite { step, body: None } => {
                write!(f, "Non-finite energy at step {}", step)
            }
        }
    }
}

impl std::error::Error for SimError {}
