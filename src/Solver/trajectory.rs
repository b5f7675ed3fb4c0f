use crate::error::SimulationError;
use nalgebra::{DMatrix, DVector};

/// States of a run, one row per time point.
///
/// Row `n` is the stacked state `[Sw1, Sw2]` at `times[n]`; row 0 is the initial condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub times: DVector<f64>,
    pub states: DMatrix<f64>,
}

impl Trajectory {
    /// Builds the matrix from per-step states. All states must have the same length.
    pub fn from_states(
        times: DVector<f64>,
        states: &[DVector<f64>],
    ) -> Result<Self, SimulationError> {
        if times.len() != states.len() {
            return Err(SimulationError::MissingData(format!(
                "{} time points for {} states",
                times.len(),
                states.len()
            )));
        }
        let cols = states.first().map_or(0, |s| s.len());
        if let Some(bad) = states.iter().find(|s| s.len() != cols) {
            return Err(SimulationError::ShapeMismatch {
                expected: cols,
                found: bad.len(),
            });
        }
        let states = DMatrix::from_fn(states.len(), cols, |r, c| states[r][c]);
        Ok(Self { times, states })
    }

    /// Rebuilds a trajectory from a row-major buffer of `rows x cols` values.
    pub fn from_row_major(
        times: DVector<f64>,
        rows: usize,
        cols: usize,
        data: &[f64],
    ) -> Result<Self, SimulationError> {
        if data.len() != rows * cols {
            return Err(SimulationError::ShapeMismatch {
                expected: rows * cols,
                found: data.len(),
            });
        }
        if times.len() != rows {
            return Err(SimulationError::MissingData(format!(
                "{} time points for {} stored rows",
                times.len(),
                rows
            )));
        }
        Ok(Self {
            times,
            states: DMatrix::from_row_slice(rows, cols, data),
        })
    }

    /// Number of stored time points
    pub fn n_points(&self) -> usize {
        self.states.nrows()
    }

    /// Length of one state, `2 * Nx`
    pub fn state_len(&self) -> usize {
        self.states.ncols()
    }

    pub fn state(&self, n: usize) -> DVector<f64> {
        self.states.row(n).transpose()
    }

    pub fn last_state(&self) -> Option<DVector<f64>> {
        self.n_points()
            .checked_sub(1)
            .map(|n| self.state(n))
    }

    /// Flattened copy, row after row.
    pub fn to_row_major(&self) -> Vec<f64> {
        let mut data = Vec::with_capacity(self.states.len());
        for row in self.states.row_iter() {
            data.extend(row.iter().copied());
        }
        data
    }

    /// Splits every row into the layer-1 block `[0, nx)` and the layer-2 block `[nx, 2 nx)`.
    pub fn split_layers(
        &self,
        nx: usize,
    ) -> Result<(DMatrix<f64>, DMatrix<f64>), SimulationError> {
        if self.state_len() != 2 * nx {
            return Err(SimulationError::ShapeMismatch {
                expected: 2 * nx,
                found: self.state_len(),
            });
        }
        let layer1 = self.states.columns(0, nx).into_owned();
        let layer2 = self.states.columns(nx, nx).into_owned();
        Ok((layer1, layer2))
    }
}
