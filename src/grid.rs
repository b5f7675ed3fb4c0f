//! # Grid Module
//!
//! Uniform one-dimensional discretization of the domain `[0, L]`.
//!
//! The spacing used by the difference operators is `dx = L / Nx` (cell width), while the
//! coordinates used for output are `Nx` evenly spaced points from `0` to `L` inclusive.
use crate::config::SimConfig;
use crate::error::SimulationError;
use nalgebra::DVector;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// number of cells
    pub Nx: usize,
    /// domain length
    pub L: f64,
    /// cell width L/Nx
    pub dx: f64,
    /// cell coordinates, `Nx` points from 0 to L
    pub x: DVector<f64>,
}

impl Grid {
    #[allow(non_snake_case)]
    pub fn new(L: f64, Nx: usize) -> Result<Self, SimulationError> {
        if Nx < 2 {
            return Err(SimulationError::InvalidConfig(format!(
                "grid needs at least 2 cells, got {}",
                Nx
            )));
        }
        if !(L > 0.0) || !L.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "domain length must be positive and finite, got {}",
                L
            )));
        }
        let dx = L / Nx as f64;
        let x = linspace(0.0, L, Nx);
        Ok(Self { Nx, L, dx, x })
    }

    pub fn from_config(config: &SimConfig) -> Result<Self, SimulationError> {
        Self::new(config.L, config.Nx)
    }

    /// Numerical diffusion coefficient `diff_scale * dx^2`.
    pub fn diffusion_coefficient(&self, diff_scale: f64) -> f64 {
        diff_scale * self.dx * self.dx
    }
}

/// `num` evenly spaced points over `[start, stop]`, both ends included.
/// The last point equals `stop` exactly.
pub fn linspace(start: f64, stop: f64, num: usize) -> DVector<f64> {
    match num {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, start),
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut points = DVector::from_fn(num, |i, _| start + i as f64 * step);
            points[num - 1] = stop;
            points
        }
    }
}
