//! Optional check of the state after each time step.
//!
//! The fixed-point scheme does not clamp saturations and has no convergence test, so a
//! too large time step shows up as values outside `[0, 1]` or as NaN/Inf. With
//! [`ValidationPolicy::Off`] nothing is checked and the hot loop is untouched.
use crate::Physics::permeability::is_out_of_range;
use crate::error::SimulationError;
use log::{error, warn};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Round-off allowance around `[0, 1]`
pub const SATURATION_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationPolicy {
    #[default]
    Off,
    /// log the first offending cell and keep integrating
    Warn,
    /// stop the run at the first offending cell
    Fail,
}

#[derive(Debug, Clone)]
pub struct StepValidator {
    pub policy: ValidationPolicy,
    pub tolerance: f64,
    warned: bool,
}

impl StepValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            tolerance: SATURATION_TOLERANCE,
            warned: false,
        }
    }

    /// First problem of `state` after step `step`, if any. NaN/Inf wins over range.
    pub fn find_violation(&self, step: usize, state: &DVector<f64>) -> Option<SimulationError> {
        let mut out_of_range = None;
        for (index, &value) in state.iter().enumerate() {
            if !value.is_finite() {
                return Some(SimulationError::Divergence { step, index, value });
            }
            if out_of_range.is_none() && is_out_of_range(value, self.tolerance) {
                out_of_range = Some(SimulationError::OutOfRange { step, index, value });
            }
        }
        out_of_range
    }

    pub fn check(&mut self, step: usize, state: &DVector<f64>) -> Result<(), SimulationError> {
        if self.policy == ValidationPolicy::Off {
            return Ok(());
        }
        let Some(violation) = self.find_violation(step, state) else {
            return Ok(());
        };
        match self.policy {
            ValidationPolicy::Fail => {
                error!("{}", violation);
                Err(violation)
            }
            _ => {
                // one warning per run, later steps usually repeat the same problem
                if !self.warned {
                    warn!("{}", violation);
                    self.warned = true;
                }
                Ok(())
            }
        }
    }

    pub fn has_warned(&self) -> bool {
        self.warned
    }
}
