#[cfg(test)]
mod tests {
    use crate::Simulation::runner::SimulationRunner;
    use crate::Simulation::store::{NoPersistence, TrajectorySink, TrajectoryStore};
    use crate::Solver::progress::{Silent, StepCounter};
    use crate::Solver::trajectory::Trajectory;
    use crate::Solver::validation::ValidationPolicy;
    use crate::config::SimConfig;
    use crate::error::SimulationError;
    use approx::assert_relative_eq;
    use nalgebra::{DVector, dvector};
    use tempfile::{NamedTempFile, tempdir};

    fn small_config() -> SimConfig {
        SimConfig {
            Nx: 5,
            L: 1.0,
            Sw_ini: 0.2,
            Sw_inj: 0.9,
            tmin: 0.0,
            tmax: 1.0,
            time_steps_per_unit: 10.0,
            refinements: 3,
            u1: 0.02,
            u2: 0.01,
            theta_s: 0.05,
            diff_scale: 0.05,
            ..SimConfig::default()
        }
    }

    /// Strong numerical diffusion with one time point per unit: the Picard passes blow up
    /// within the first steps.
    fn diverging_config() -> SimConfig {
        SimConfig {
            Nx: 6,
            tmax: 5.0,
            time_steps_per_unit: 1.0,
            diff_scale: 1.0e3,
            validation: ValidationPolicy::Warn,
            ..SimConfig::default()
        }
    }

    /// Keeps whatever it is given.
    #[derive(Default)]
    struct MemorySink {
        saved: Option<Trajectory>,
    }

    impl TrajectorySink for MemorySink {
        fn save(&mut self, trajectory: &Trajectory) -> Result<(), SimulationError> {
            self.saved = Some(trajectory.clone());
            Ok(())
        }
    }

    #[test]
    fn test_initial_state() {
        let runner = SimulationRunner::new(small_config()).unwrap();
        let s0 = runner.initial_state();
        assert_eq!(s0.len(), 10);
        assert_eq!(s0[0], 0.9);
        assert_eq!(s0[5], 0.9);
        for i in [1, 2, 3, 4, 6, 7, 8, 9] {
            assert_eq!(s0[i], 0.2);
        }
        assert_eq!(runner.tpart(), 10);
    }

    #[test]
    fn test_small_scenario_end_to_end() {
        let runner = SimulationRunner::new(small_config()).unwrap();
        let mut sink = MemorySink::default();
        let mut counter = StepCounter::default();
        let result = runner.run(&mut sink, &mut counter).unwrap();

        let trajectory = sink.saved.expect("trajectory handed to the sink");
        assert_eq!(trajectory.n_points(), 10);
        assert_eq!(trajectory.state_len(), 10);
        assert_eq!(trajectory.state(0), runner.initial_state());
        assert_eq!(counter.steps, 9);
        assert!(trajectory.states.iter().all(|&s| (0.0..=1.0).contains(&s)));

        assert_eq!(result.Sw1_all.shape(), (10, 5));
        assert_eq!(result.Sw2_all.shape(), (10, 5));
        assert_eq!(result.x.len(), 5);
        assert_eq!(result.x[4], 1.0);
        assert_eq!(result.trajectory, trajectory);

        // reference values of the last time point
        let expected = [
            0.9,
            0.477542726658998,
            0.37079576029536615,
            0.23335884683869482,
            0.2,
            0.9,
            0.4354367275022679,
            0.2862878737220303,
            0.20556824317052114,
            0.2,
        ];
        let last = trajectory.last_state().unwrap();
        for (i, value) in expected.iter().enumerate() {
            assert_relative_eq!(last[i], *value, epsilon = 1e-8);
        }
        assert_eq!(result.Sw1_all[(9, 1)], last[1]);
        assert_eq!(result.Sw2_all[(9, 1)], last[6]);
    }

    #[test]
    fn test_stronger_exchange_narrows_layer_gap() {
        let gap = |theta_s: f64| {
            let config = SimConfig {
                theta_s,
                ..small_config()
            };
            let runner = SimulationRunner::new(config).unwrap();
            let trajectory = runner.solve(&mut Silent).unwrap();
            let last = trajectory.last_state().unwrap();
            (last[2] - last[7]).abs()
        };
        let weak = gap(0.0);
        let medium = gap(0.1);
        let strong = gap(0.4);
        assert!(medium < weak, "{} !< {}", medium, weak);
        assert!(strong < medium, "{} !< {}", strong, medium);
    }

    #[test]
    fn test_rerun_is_bit_identical() {
        let runner = SimulationRunner::new(small_config()).unwrap();
        let a = runner.run(&mut NoPersistence, &mut Silent).unwrap();
        let b = runner.run(&mut NoPersistence, &mut Silent).unwrap();
        assert_eq!(a.trajectory, b.trajectory);
    }

    #[test]
    fn test_invalid_config_fails_before_stepping() {
        let config = SimConfig {
            Nx: 1,
            ..small_config()
        };
        assert!(matches!(
            SimulationRunner::new(config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let file = NamedTempFile::new().unwrap();
        small_config().save(file.path()).unwrap();
        let runner = SimulationRunner::from_file(file.path()).unwrap();
        assert_eq!(runner.config, small_config());
        assert_eq!(runner.grid.Nx, 5);
    }

    #[test]
    fn test_run_or_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("saturation_data.json");
        let runner = SimulationRunner::new(small_config()).unwrap();

        let mut counter = StepCounter::default();
        let computed = runner.run_or_load(&path, &mut counter).unwrap();
        assert!(path.exists());
        assert_eq!(counter.steps, 9);

        // second call reads the file and does not integrate
        let mut counter = StepCounter::default();
        let loaded = runner.run_or_load(&path, &mut counter).unwrap();
        assert_eq!(counter.steps, 0);
        assert_eq!(loaded.trajectory, computed.trajectory);
        assert_eq!(loaded.Sw1_all, computed.Sw1_all);

        // stored trajectory does not fit a different grid
        let other = SimulationRunner::new(SimConfig {
            Nx: 6,
            ..small_config()
        })
        .unwrap();
        assert!(matches!(
            other.run_or_load(&path, &mut Silent),
            Err(SimulationError::StaleTrajectory(_))
        ));
    }

    #[test]
    fn test_run_or_load_rejects_changed_constants() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saturation_data.json");
        SimulationRunner::new(small_config())
            .unwrap()
            .run_or_load(&path, &mut Silent)
            .unwrap();

        let longer = SimulationRunner::new(SimConfig {
            tmax: 2.0,
            ..small_config()
        })
        .unwrap();
        assert!(matches!(
            longer.run_or_load(&path, &mut Silent),
            Err(SimulationError::StaleTrajectory(_))
        ));
        let stronger_exchange = SimulationRunner::new(SimConfig {
            theta_s: 0.2,
            ..small_config()
        })
        .unwrap();
        assert!(matches!(
            stronger_exchange.run_or_load(&path, &mut Silent),
            Err(SimulationError::StaleTrajectory(_))
        ));

        // the validation policy does not change the numbers
        let checked = SimulationRunner::new(SimConfig {
            validation: ValidationPolicy::Fail,
            ..small_config()
        })
        .unwrap();
        let mut counter = StepCounter::default();
        checked.run_or_load(&path, &mut counter).unwrap();
        assert_eq!(counter.steps, 0);
    }

    #[test]
    fn test_run_or_load_checks_shape_without_stored_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.json");
        let runner = SimulationRunner::new(small_config()).unwrap();
        let trajectory = runner.solve(&mut Silent).unwrap();
        TrajectoryStore::new(&path).save(&trajectory).unwrap();

        // same grid, twice as many time points
        let longer = SimulationRunner::new(SimConfig {
            time_steps_per_unit: 20.0,
            ..small_config()
        })
        .unwrap();
        assert!(matches!(
            longer.run_or_load(&path, &mut Silent),
            Err(SimulationError::ShapeMismatch {
                expected: 20,
                found: 10
            })
        ));

        let wider = SimulationRunner::new(SimConfig {
            Nx: 6,
            ..small_config()
        })
        .unwrap();
        assert!(matches!(
            wider.run_or_load(&path, &mut Silent),
            Err(SimulationError::ShapeMismatch {
                expected: 12,
                found: 10
            })
        ));

        let mut counter = StepCounter::default();
        let loaded = runner.run_or_load(&path, &mut counter).unwrap();
        assert_eq!(counter.steps, 0);
        assert_eq!(loaded.trajectory, trajectory);
    }

    #[test]
    fn test_non_finite_trajectory_is_not_stored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saturation_data.json");
        let runner = SimulationRunner::new(diverging_config()).unwrap();

        let result = runner.run(&mut NoPersistence, &mut Silent).unwrap();
        assert!(result.trajectory.states.iter().any(|v| !v.is_finite()));

        assert!(matches!(
            runner.run_or_load(&path, &mut Silent),
            Err(SimulationError::Divergence { .. })
        ));
        assert!(!path.exists());

        // the next launch recomputes instead of tripping over an unreadable file
        let mut counter = StepCounter::default();
        assert!(matches!(
            runner.run_or_load(&path, &mut counter),
            Err(SimulationError::Divergence { .. })
        ));
        assert_eq!(counter.steps, 4);
        assert!(!path.exists());
    }

    #[test]
    fn test_store_refuses_nan_and_inf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.json");
        let times = dvector![0.0, 1.0];
        let states: Vec<DVector<f64>> = vec![dvector![0.9, 0.2], dvector![0.9, f64::NAN]];
        let trajectory = Trajectory::from_states(times.clone(), &states).unwrap();

        let mut store = TrajectoryStore::new(&path);
        assert!(matches!(
            store.save(&trajectory),
            Err(SimulationError::Divergence {
                step: 1,
                index: 1,
                ..
            })
        ));
        assert!(!path.exists());

        let states = vec![dvector![f64::INFINITY, 0.2], dvector![0.9, 0.3]];
        let trajectory = Trajectory::from_states(times, &states).unwrap();
        assert!(matches!(
            store.save(&trajectory),
            Err(SimulationError::Divergence {
                step: 0,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_store_round_trip_keeps_row_major_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.json");
        let runner = SimulationRunner::new(small_config()).unwrap();
        let trajectory = runner.solve(&mut Silent).unwrap();

        let mut store = TrajectoryStore::new(&path);
        store.save(&trajectory).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["rows"], 10);
        assert_eq!(raw["cols"], 10);
        // second row starts with the inlet of layer 1, then four layer-1 cells
        assert_eq!(raw["data"][10], 0.9);
        assert_eq!(raw["data"][15], 0.9);

        assert_eq!(store.load().unwrap(), trajectory);
    }

    #[test]
    fn test_store_missing_file() {
        let dir = tempdir().unwrap();
        let store = TrajectoryStore::new(dir.path().join("absent.json"));
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(SimulationError::Io(_))));
    }
}
