//! # Configuration Module
//!
//! ## Purpose
//! Holds every physical and numerical constant of a two-layer foam displacement run.
//! The configuration is read once from a JSON document, validated, and then passed by
//! reference to every part of the solver. Nothing in the crate keeps a global copy.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "Swc": 0.2, "Sgr": 0.18, "Sw_star": 0.37, "A": 400.0,
//!   "mu_w": 1.0e-3, "mu_g": 2.0e-5,
//!   "k1": 1.0, "k2": 0.5, "u1": 1.0e-3, "u2": 5.0e-4,
//!   "phi": 0.25, "theta_s": 1.0e-3,
//!   "Sw_inj": 0.8, "Sw_ini": 0.2,
//!   "L": 1.0, "Nx": 100, "diff_scale": 1.0e-3,
//!   "tmin": 0.0, "tmax": 100.0, "time_steps_per_unit": 10.0,
//!   "refinements": 10,
//!   "validation": "Warn"
//! }
//! ```
//! All fields except `validation` are required; unknown keys are rejected.
//!
//! ## Symbols
//! | Field | Description |
//! |-------|-------------|
//! | `Swc` | connate water saturation |
//! | `Sgr` | residual gas saturation |
//! | `Sw_star` | foam onset water saturation |
//! | `A` | foam strength coefficient |
//! | `mu_w`, `mu_g` | water and gas viscosity |
//! | `k1`, `k2` | absolute permeability of layer 1 and 2 |
//! | `u1`, `u2` | superficial velocity of layer 1 and 2 |
//! | `phi` | porosity |
//! | `theta_s` | interlayer exchange coefficient |
//! | `Sw_inj`, `Sw_ini` | injection and initial water saturation |
//! | `L`, `Nx` | domain length and number of cells |
//! | `diff_scale` | numerical diffusion scale, `D = diff_scale * dx^2` |
//! | `tmin`, `tmax` | time bounds |
//! | `time_steps_per_unit` | time points per unit of time |
//! | `refinements` | fixed-point passes per backward Euler step |

use crate::Solver::validation::ValidationPolicy;
use crate::error::SimulationError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    pub Swc: f64,
    pub Sgr: f64,
    pub Sw_star: f64,
    pub A: f64,
    pub mu_w: f64,
    pub mu_g: f64,
    pub k1: f64,
    pub k2: f64,
    pub u1: f64,
    pub u2: f64,
    pub phi: f64,
    pub theta_s: f64,
    pub Sw_inj: f64,
    pub Sw_ini: f64,
    pub L: f64,
    pub Nx: usize,
    pub diff_scale: f64,
    pub tmin: f64,
    pub tmax: f64,
    pub time_steps_per_unit: f64,
    pub refinements: usize,
    /// what to do with NaN/Inf or out-of-range saturations after each step
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            Swc: 0.2,
            Sgr: 0.18,
            Sw_star: 0.37,
            A: 400.0,
            mu_w: 1.0e-3,
            mu_g: 2.0e-5,
            k1: 1.0,
            k2: 0.5,
            u1: 1.0e-3,
            u2: 5.0e-4,
            phi: 0.25,
            theta_s: 1.0e-3,
            Sw_inj: 0.8,
            Sw_ini: 0.2,
            L: 1.0,
            Nx: 100,
            diff_scale: 1.0e-3,
            tmin: 0.0,
            tmax: 100.0,
            time_steps_per_unit: 10.0,
            refinements: 10,
            validation: ValidationPolicy::Warn,
        }
    }
}

impl SimConfig {
    /// Reads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        info!("Configuration loaded from '{}'", path.display());
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SimulationError> {
        let config: SimConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Number of time points of the run: `floor((tmax - tmin) * time_steps_per_unit)`.
    pub fn tpart(&self) -> usize {
        ((self.tmax - self.tmin) * self.time_steps_per_unit).floor() as usize
    }

    /// Checks every constant that would otherwise break the run halfway through.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let all_finite = [
            self.Swc,
            self.Sgr,
            self.Sw_star,
            self.A,
            self.mu_w,
            self.mu_g,
            self.k1,
            self.k2,
            self.u1,
            self.u2,
            self.phi,
            self.theta_s,
            self.Sw_inj,
            self.Sw_ini,
            self.L,
            self.diff_scale,
            self.tmin,
            self.tmax,
            self.time_steps_per_unit,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(invalid("all constants must be finite numbers"));
        }
        if self.Nx < 3 {
            return Err(invalid(&format!(
                "Nx must be at least 3 (got {}): the scheme needs one interior cell",
                self.Nx
            )));
        }
        if self.L <= 0.0 {
            return Err(invalid("L must be positive"));
        }
        if self.phi <= 0.0 {
            return Err(invalid("phi must be positive"));
        }
        if self.mu_w <= 0.0 || self.mu_g <= 0.0 {
            return Err(invalid("viscosities mu_w and mu_g must be positive"));
        }
        if self.k1 < 0.0 || self.k2 < 0.0 {
            return Err(invalid("permeabilities k1 and k2 must be non-negative"));
        }
        if self.u1 < 0.0 || self.u2 < 0.0 {
            return Err(invalid("velocities u1 and u2 must be non-negative (flow towards +x)"));
        }
        if self.theta_s < 0.0 {
            return Err(invalid("theta_s must be non-negative"));
        }
        if self.diff_scale < 0.0 {
            return Err(invalid("diff_scale must be non-negative"));
        }
        for (name, value) in [("Sw_inj", self.Sw_inj), ("Sw_ini", self.Sw_ini)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(&format!("{} must lie in [0, 1], got {}", name, value)));
            }
        }
        if 1.0 - self.Swc - self.Sgr <= 0.0 {
            return Err(invalid("1 - Swc - Sgr must be positive"));
        }
        if self.tmax <= self.tmin {
            return Err(invalid("tmax must be greater than tmin"));
        }
        if self.time_steps_per_unit <= 0.0 {
            return Err(invalid("time_steps_per_unit must be positive"));
        }
        if self.tpart() < 1 {
            return Err(invalid(
                "(tmax - tmin) * time_steps_per_unit must give at least one time point",
            ));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SimulationError {
    SimulationError::InvalidConfig(msg.to_string())
}
