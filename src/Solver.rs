//! # Solver Module
//!
//! Numerical engine of the two-layer saturation transport problem.
//!
//! ## Governing Equations
//!
//! For layer `l` with velocity `ul`, permeability `kl` and the exchange coefficient `θ`:
//!
//! ```text
//! φ dS1/dt = -u1 d fw(S1, k1)/dx - θ (S1 - S2) + D d²S1/dx²
//! φ dS2/dt = -u2 d fw(S2, k2)/dx + θ (S1 - S2) + D d²S2/dx²
//! ```
//!
//! with `D = diff_scale * dx²`. Advection uses first-order upwind differences, diffusion a
//! central second difference. The first and last cell of each layer are frozen.
//!
//! ## Time Stepping
//!
//! Backward Euler, `S_n = S_{n-1} + dt f(t_n, S_n)`, where the implicit equation is
//! approached by a fixed number of fixed-point (Picard) passes starting from an explicit
//! predictor. There is no convergence test: every step costs `refinements + 1` evaluations
//! of the right-hand side.
//!
//! ## Main Structures
//! - [`derivative::DerivativeEvaluator`]: right-hand side `f(t, S)`
//! - [`backward_euler::BackwardEuler`]: time integrator
//! - [`trajectory::Trajectory`]: all states of a run, one row per time point
//! - [`progress::ProgressObserver`]: per-step callback with no access to the state
//! - [`validation::StepValidator`]: optional NaN/Inf and bounds check after every step

pub mod backward_euler;
pub mod derivative;
pub mod progress;
pub mod trajectory;
pub mod validation;
