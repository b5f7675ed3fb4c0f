use super::store::{TrajectorySink, TrajectoryStore};
use crate::Solver::backward_euler::BackwardEuler;
use crate::Solver::derivative::DerivativeEvaluator;
use crate::Solver::progress::ProgressObserver;
use crate::Solver::trajectory::Trajectory;
use crate::config::SimConfig;
use crate::error::SimulationError;
use crate::grid::Grid;
use log::info;
use nalgebra::{DMatrix, DVector};
use std::path::Path;
use std::time::Instant;

/// Per-layer saturation histories of a run.
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// layer 1, one row per time point
    pub Sw1_all: DMatrix<f64>,
    /// layer 2, one row per time point
    pub Sw2_all: DMatrix<f64>,
    /// cell coordinates
    pub x: DVector<f64>,
    pub trajectory: Trajectory,
}

/// Owns the configuration and grid of one run and drives the integration.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    pub config: SimConfig,
    pub grid: Grid,
}

impl SimulationRunner {
    pub fn new(config: SimConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let grid = Grid::from_config(&config)?;
        Ok(Self { config, grid })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        Self::new(SimConfig::from_file(path)?)
    }

    /// Uniform `Sw_ini` in both layers, `Sw_inj` in the first cell of each layer.
    pub fn initial_state(&self) -> DVector<f64> {
        let nx = self.grid.Nx;
        let mut s0 = DVector::from_element(2 * nx, self.config.Sw_ini);
        s0[0] = self.config.Sw_inj;
        s0[nx] = self.config.Sw_inj;
        s0
    }

    pub fn tpart(&self) -> usize {
        self.config.tpart()
    }

    pub fn evaluator(&self) -> DerivativeEvaluator {
        DerivativeEvaluator::new(&self.config, &self.grid)
    }

    pub fn integrator(&self) -> BackwardEuler {
        BackwardEuler::new(self.config.refinements).with_validation(self.config.validation)
    }

    /// Integrates from the initial condition over the whole horizon.
    pub fn solve<O>(&self, observer: &mut O) -> Result<Trajectory, SimulationError>
    where
        O: ProgressObserver + ?Sized,
    {
        let tpart = self.tpart();
        info!(
            "Solving {} time points, Nx = {}, {} refinements per step",
            tpart, self.grid.Nx, self.config.refinements
        );
        let start = Instant::now();
        let trajectory = self.integrator().integrate(
            &self.evaluator(),
            &self.initial_state(),
            self.config.tmin,
            self.config.tmax,
            tpart,
            observer,
        )?;
        info!("Integration finished in {:.3?}", start.elapsed());
        Ok(trajectory)
    }

    /// Solves, passes the trajectory to `sink` and splits it by layer.
    pub fn run<S, O>(
        &self,
        sink: &mut S,
        observer: &mut O,
    ) -> Result<SimulationResult, SimulationError>
    where
        S: TrajectorySink + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let trajectory = self.solve(observer)?;
        sink.save(&trajectory)?;
        self.split(trajectory)
    }

    /// Loads the trajectory stored at `path` if the file exists, otherwise runs the
    /// simulation and stores the result there together with the configuration.
    ///
    /// A stored trajectory must match this run: `2 * Nx` columns, `tpart` rows and, when
    /// the file records one, the same configuration (the validation policy aside).
    pub fn run_or_load<P, O>(
        &self,
        path: P,
        observer: &mut O,
    ) -> Result<SimulationResult, SimulationError>
    where
        P: AsRef<Path>,
        O: ProgressObserver + ?Sized,
    {
        let mut store = TrajectoryStore::new(path).with_config(self.config.clone());
        if store.exists() {
            let stored = store.load_stored()?;
            if let Some(config) = &stored.config {
                if !self.same_run_constants(config) {
                    return Err(SimulationError::StaleTrajectory(format!(
                        "'{}' was computed with a different configuration",
                        store.path().display()
                    )));
                }
            }
            let trajectory = stored.into_trajectory()?;
            let expected = 2 * self.grid.Nx;
            if trajectory.state_len() != expected {
                return Err(SimulationError::ShapeMismatch {
                    expected,
                    found: trajectory.state_len(),
                });
            }
            if trajectory.n_points() != self.tpart() {
                return Err(SimulationError::ShapeMismatch {
                    expected: self.tpart(),
                    found: trajectory.n_points(),
                });
            }
            info!(
                "Reusing trajectory {}x{} from '{}'",
                trajectory.n_points(),
                trajectory.state_len(),
                store.path().display()
            );
            return self.split(trajectory);
        }
        info!(
            "No stored trajectory at '{}', running the simulation",
            store.path().display()
        );
        self.run(&mut store, observer)
    }

    fn same_run_constants(&self, other: &SimConfig) -> bool {
        let other = SimConfig {
            validation: self.config.validation,
            ..other.clone()
        };
        other == self.config
    }

    #[allow(non_snake_case)]
    fn split(&self, trajectory: Trajectory) -> Result<SimulationResult, SimulationError> {
        let (Sw1_all, Sw2_all) = trajectory.split_layers(self.grid.Nx)?;
        Ok(SimulationResult {
            Sw1_all,
            Sw2_all,
            x: self.grid.x.clone(),
            trajectory,
        })
    }
}
