use crate::Solver::trajectory::Trajectory;
use crate::config::SimConfig;
use crate::error::SimulationError;
use log::{error, info};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives the finished trajectory of a run.
pub trait TrajectorySink {
    fn save(&mut self, trajectory: &Trajectory) -> Result<(), SimulationError>;
}

/// Drops the trajectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl TrajectorySink for NoPersistence {
    fn save(&mut self, _trajectory: &Trajectory) -> Result<(), SimulationError> {
        Ok(())
    }
}

/// On-disk layout: `rows x cols` values, row-major, one row per time point,
/// layer 1 then layer 2 inside a row. `config` is the configuration the trajectory
/// was computed with, when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTrajectory {
    pub rows: usize,
    pub cols: usize,
    pub times: Vec<f64>,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SimConfig>,
}

impl From<&Trajectory> for StoredTrajectory {
    fn from(trajectory: &Trajectory) -> Self {
        Self {
            rows: trajectory.n_points(),
            cols: trajectory.state_len(),
            times: trajectory.times.iter().copied().collect(),
            data: trajectory.to_row_major(),
            config: None,
        }
    }
}

impl StoredTrajectory {
    pub fn into_trajectory(self) -> Result<Trajectory, SimulationError> {
        Trajectory::from_row_major(
            DVector::from_vec(self.times),
            self.rows,
            self.cols,
            &self.data,
        )
    }
}

/// First NaN/Inf of the trajectory as a `Divergence` error. JSON has no encoding for
/// these values, so such a trajectory cannot be stored.
pub fn find_non_finite(trajectory: &Trajectory) -> Option<SimulationError> {
    for (step, row) in trajectory.states.row_iter().enumerate() {
        if let Some((index, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Some(SimulationError::Divergence { step, index, value });
        }
    }
    None
}

/// JSON file holding one trajectory.
#[derive(Debug, Clone)]
pub struct TrajectoryStore {
    path: PathBuf,
    config: Option<SimConfig>,
}

impl TrajectoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config: None,
        }
    }

    /// Records `config` next to every saved trajectory.
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Raw file content, the stored configuration included.
    pub fn load_stored(&self) -> Result<StoredTrajectory, SimulationError> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(&self) -> Result<Trajectory, SimulationError> {
        let trajectory = self.load_stored()?.into_trajectory()?;
        info!(
            "Loaded trajectory {}x{} from '{}'",
            trajectory.n_points(),
            trajectory.state_len(),
            self.path.display()
        );
        Ok(trajectory)
    }
}

impl TrajectorySink for TrajectoryStore {
    /// Fails with `Divergence` and leaves the file untouched when the trajectory holds
    /// NaN or Inf.
    fn save(&mut self, trajectory: &Trajectory) -> Result<(), SimulationError> {
        if let Some(err) = find_non_finite(trajectory) {
            error!(
                "Trajectory not saved to '{}': {}",
                self.path.display(),
                err
            );
            return Err(err);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        let stored = StoredTrajectory {
            config: self.config.clone(),
            ..StoredTrajectory::from(trajectory)
        };
        serde_json::to_writer(&mut writer, &stored)?;
        writer.flush()?;
        info!(
            "Saved trajectory {}x{} to '{}'",
            trajectory.n_points(),
            trajectory.state_len(),
            self.path.display()
        );
        Ok(())
    }
}
