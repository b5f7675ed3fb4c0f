//! Terminal front end of a simulation run: load or build the configuration, run (or reuse a
//! stored trajectory) and print the profiles.
use super::cli_main::get_user_input;
use crate::Physics::permeability::PermeabilityModel;
use crate::Simulation::runner::SimulationRunner;
use crate::Solver::progress::ProgressReporter;
use crate::config::SimConfig;
use crate::error::SimulationError;
use crate::report::{FRAME_STRIDE, config_table, print_frames, print_profile};
use log::{error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trajectory file used when none is given.
pub const DEFAULT_TRAJECTORY_FILE: &str = "saturation_data.json";
/// Configuration file written by the menu.
pub const DEFAULT_CONFIG_FILE: &str = "foam_config.json";

/// Runs `config` and prints every `FRAME_STRIDE`-th profile. The trajectory is read from
/// `trajectory_path` when that file exists.
pub fn run_and_report(config: SimConfig, trajectory_path: &Path) -> Result<(), SimulationError> {
    let runner = SimulationRunner::new(config)?;
    println!("\n=== Configuration ===");
    config_table(&runner.config).printstd();

    let mut progress = ProgressReporter::logging(runner.tpart(), 10);
    let result = runner.run_or_load(trajectory_path, &mut progress)?;
    let permeability = PermeabilityModel::from_config(&runner.config);
    print_frames(&result, &permeability, FRAME_STRIDE)?;
    Ok(())
}

/// Non-interactive entry: `[config.json] [trajectory.json]`, prints the final profile.
pub fn run_from_args(args: &[String]) -> Result<(), SimulationError> {
    let config = match args.first() {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    let trajectory_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRAJECTORY_FILE));
    print_final_profile(config, &trajectory_path)
}

fn prompt(message: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", message);
    let _ = io::stdout().flush();
    get_user_input().unwrap_or_default().trim().to_string()
}

fn prompt_or_default(message: &str, default: &str) -> PathBuf {
    let answer = prompt(&format!("{} [{}]: ", message, default));
    if answer.is_empty() {
        PathBuf::from(default)
    } else {
        PathBuf::from(answer)
    }
}

fn report_error(result: Result<(), SimulationError>) {
    if let Err(e) = result {
        error!("{}", e);
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}

pub fn run_default_simulation() {
    let trajectory_path = prompt_or_default("Trajectory file", DEFAULT_TRAJECTORY_FILE);
    report_error(run_and_report(SimConfig::default(), &trajectory_path));
}

pub fn run_from_file_dialog() {
    let config_path = prompt_or_default("Configuration file", DEFAULT_CONFIG_FILE);
    let trajectory_path = prompt_or_default("Trajectory file", DEFAULT_TRAJECTORY_FILE);
    report_error(
        SimConfig::from_file(&config_path)
            .and_then(|config| run_and_report(config, &trajectory_path)),
    );
}

pub fn print_config_from_file() {
    let config_path = prompt_or_default("Configuration file", DEFAULT_CONFIG_FILE);
    report_error(SimConfig::from_file(&config_path).map(|config| {
        config_table(&config).printstd();
    }));
}

pub fn write_default_config() {
    let config_path = prompt_or_default("Write configuration to", DEFAULT_CONFIG_FILE);
    report_error(SimConfig::default().save(&config_path).map(|_| {
        info!("Default configuration written to '{}'", config_path.display());
    }));
}

pub fn print_final_profile(
    config: SimConfig,
    trajectory_path: &Path,
) -> Result<(), SimulationError> {
    let runner = SimulationRunner::new(config)?;
    let mut progress = ProgressReporter::logging(runner.tpart(), 10);
    let result = runner.run_or_load(trajectory_path, &mut progress)?;
    let permeability = PermeabilityModel::from_config(&runner.config);
    print_profile(&result, &permeability, result.Sw1_all.nrows().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tiny_config() -> SimConfig {
        SimConfig {
            Nx: 6,
            tmax: 1.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_run_from_args_writes_trajectory() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let trajectory_path = dir.path().join("out").join("trajectory.json");
        tiny_config().save(&config_path).unwrap();

        let args = vec![
            config_path.display().to_string(),
            trajectory_path.display().to_string(),
        ];
        run_from_args(&args).unwrap();
        assert!(trajectory_path.exists());
        // reuses the stored trajectory
        run_from_args(&args).unwrap();
    }

    #[test]
    fn test_run_from_args_missing_config() {
        let dir = tempdir().unwrap();
        let args = vec![dir.path().join("absent.json").display().to_string()];
        assert!(matches!(run_from_args(&args), Err(SimulationError::Io(_))));
    }

    #[test]
    fn test_print_final_profile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.json");
        print_final_profile(tiny_config(), &path).unwrap();
        assert!(path.exists());
    }
}
