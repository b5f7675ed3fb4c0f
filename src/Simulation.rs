//! # Simulation Module
//!
//! Glue around the solver: builds the initial condition from the configuration, runs the
//! backward Euler integration over the whole horizon, hands the trajectory to a
//! persistence sink and splits it into per-layer saturation histories.
//!
//! ## Typical Use
//! ```rust,ignore
//! use FoamFlow::Simulation::runner::SimulationRunner;
//! use FoamFlow::Solver::progress::ProgressReporter;
//!
//! let runner = SimulationRunner::from_file("constants.json")?;
//! let mut progress = ProgressReporter::logging(runner.tpart(), 10);
//! let result = runner.run_or_load("saturation_data.json", &mut progress)?;
//! println!("{}", result.Sw1_all.nrows());
//! ```

pub mod runner;
pub mod store;
mod simulation_tests;
