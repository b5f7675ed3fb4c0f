#[allow(non_snake_case)]
pub mod Physics;
#[allow(non_snake_case)]
pub mod Simulation;
#[allow(non_snake_case)]
pub mod Solver;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod report;
