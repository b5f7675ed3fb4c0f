//! # Report Module
//!
//! Text tables for the terminal: the configuration of a run and saturation profiles at
//! selected time points. Profiles also show the foam indicator of both layers,
//! recomputed from the stored saturations.
use crate::Physics::permeability::PermeabilityModel;
use crate::Simulation::runner::SimulationResult;
use crate::config::SimConfig;
use crate::error::SimulationError;
use prettytable::{Table, row};

/// Default distance between printed frames.
pub const FRAME_STRIDE: usize = 50;

pub fn config_table(config: &SimConfig) -> Table {
    let c = config;
    let entries: [(&str, String, &str); 17] = [
        ("Swc", format!("{:.4}", c.Swc), "connate water saturation"),
        ("Sgr", format!("{:.4}", c.Sgr), "residual gas saturation"),
        ("Sw_star", format!("{:.4}", c.Sw_star), "foam onset saturation"),
        ("A", format!("{:.4e}", c.A), "foam strength coefficient"),
        ("mu_w", format!("{:.4e}", c.mu_w), "water viscosity"),
        ("mu_g", format!("{:.4e}", c.mu_g), "gas viscosity"),
        ("k1 / k2", format!("{:.4e} / {:.4e}", c.k1, c.k2), "layer permeabilities"),
        ("u1 / u2", format!("{:.4e} / {:.4e}", c.u1, c.u2), "layer velocities"),
        ("phi", format!("{:.4}", c.phi), "porosity"),
        ("theta_s", format!("{:.4e}", c.theta_s), "interlayer exchange"),
        (
            "Sw_inj / Sw_ini",
            format!("{:.4} / {:.4}", c.Sw_inj, c.Sw_ini),
            "injection / initial saturation",
        ),
        ("L / Nx", format!("{} / {}", c.L, c.Nx), "domain length / cells"),
        ("diff_scale", format!("{:.4e}", c.diff_scale), "numerical diffusion scale"),
        ("tmin / tmax", format!("{} / {}", c.tmin, c.tmax), "time bounds"),
        ("time points", c.tpart().to_string(), "(tmax - tmin) * steps per unit"),
        ("refinements", c.refinements.to_string(), "fixed-point passes per step"),
        ("validation", format!("{:?}", c.validation), "post-step check"),
    ];

    let mut table = Table::new();
    table.add_row(row!["Parameter", "Value", "Description"]);
    for (name, value, description) in entries {
        table.add_row(row![name, value, description]);
    }
    table
}

/// `x, Sw1, Sw2, nD1, nD2` at time index `n`.
pub fn profile_table(
    result: &SimulationResult,
    permeability: &PermeabilityModel,
    n: usize,
) -> Result<Table, SimulationError> {
    let n_points = result.Sw1_all.nrows();
    if n >= n_points {
        return Err(SimulationError::MissingData(format!(
            "time index {} out of {} stored points",
            n, n_points
        )));
    }
    let mut table = Table::new();
    table.add_row(row!["x", "Sw1", "Sw2", "nD1", "nD2"]);
    for (i, x) in result.x.iter().enumerate() {
        let sw1 = result.Sw1_all[(n, i)];
        let sw2 = result.Sw2_all[(n, i)];
        table.add_row(row![
            format!("{:.4}", x),
            format!("{:.5}", sw1),
            format!("{:.5}", sw2),
            format!("{:.5}", permeability.foam_indicator(sw1)),
            format!("{:.5}", permeability.foam_indicator(sw2))
        ]);
    }
    Ok(table)
}

/// Time indices printed by [`print_frames`]: every `stride`-th point, the last one always.
pub fn frame_indices(n_points: usize, stride: usize) -> Vec<usize> {
    if n_points == 0 {
        return Vec::new();
    }
    let mut frames: Vec<usize> = (0..n_points).step_by(stride.max(1)).collect();
    if frames.last() != Some(&(n_points - 1)) {
        frames.push(n_points - 1);
    }
    frames
}

pub fn print_profile(
    result: &SimulationResult,
    permeability: &PermeabilityModel,
    n: usize,
) -> Result<(), SimulationError> {
    let table = profile_table(result, permeability, n)?;
    println!("\n=== Saturation profile at t = {:.4} ===", result.trajectory.times[n]);
    table.printstd();
    Ok(())
}

pub fn print_frames(
    result: &SimulationResult,
    permeability: &PermeabilityModel,
    stride: usize,
) -> Result<(), SimulationError> {
    for n in frame_indices(result.Sw1_all.nrows(), stride) {
        print_profile(result, permeability, n)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Simulation::runner::SimulationRunner;
    use crate::Simulation::store::NoPersistence;
    use crate::Solver::progress::Silent;

    #[test]
    fn test_frame_indices() {
        assert_eq!(frame_indices(0, 50), Vec::<usize>::new());
        assert_eq!(frame_indices(1, 50), vec![0]);
        assert_eq!(frame_indices(120, 50), vec![0, 50, 100, 119]);
        assert_eq!(frame_indices(101, 50), vec![0, 50, 100]);
        assert_eq!(frame_indices(3, 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_tables() {
        let config = SimConfig {
            Nx: 6,
            tmax: 1.0,
            ..SimConfig::default()
        };
        let runner = SimulationRunner::new(config.clone()).unwrap();
        let result = runner.run(&mut NoPersistence, &mut Silent).unwrap();
        let permeability = PermeabilityModel::from_config(&config);

        let table = profile_table(&result, &permeability, 0).unwrap();
        // header plus one row per cell
        assert_eq!(table.len(), 7);
        assert!(profile_table(&result, &permeability, 10).is_err());

        assert_eq!(config_table(&config).len(), 18);
    }
}
