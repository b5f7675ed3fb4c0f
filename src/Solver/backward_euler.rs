use super::derivative::RightHandSide;
use super::progress::ProgressObserver;
use super::trajectory::Trajectory;
use super::validation::{StepValidator, ValidationPolicy};
use crate::error::SimulationError;
use crate::grid::linspace;
use log::debug;
use nalgebra::DVector;

/// Backward Euler with a fixed number of fixed-point refinement passes.
///
/// For every step from `t_{n-1}` to `t_n`:
///
/// ```text
/// x = S_{n-1} + dt f(t_n, S_{n-1})          predictor
/// x = S_{n-1} + dt f(t_n, x)                repeated `refinements` times
/// S_n = x
/// ```
///
/// This is Picard iteration on the implicit equation, not Newton. It converges only when
/// `dt` times the Lipschitz constant of `f` is below one, and nothing here checks that;
/// switch on [`ValidationPolicy`] to catch a run that went wrong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackwardEuler {
    pub refinements: usize,
    pub validation: ValidationPolicy,
}

impl BackwardEuler {
    pub fn new(refinements: usize) -> Self {
        Self {
            refinements,
            validation: ValidationPolicy::Off,
        }
    }

    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// One step from `prev` at time `t` (the end of the step) with step size `dt`.
    pub fn step<F>(&self, f: &F, t: f64, dt: f64, prev: &DVector<f64>) -> DVector<f64>
    where
        F: RightHandSide + ?Sized,
    {
        let mut x = prev + f.eval(t, prev) * dt;
        for _ in 0..self.refinements {
            x = prev + f.eval(t, &x) * dt;
        }
        x
    }

    /// Integrates over `tpart` uniformly spaced time points from `tmin` to `tmax`.
    ///
    /// Returns every state, the initial one included. With `tpart <= 1` the trajectory
    /// holds only `y0`. The observer is called once per completed step.
    pub fn integrate<F, O>(
        &self,
        f: &F,
        y0: &DVector<f64>,
        tmin: f64,
        tmax: f64,
        tpart: usize,
        observer: &mut O,
    ) -> Result<Trajectory, SimulationError>
    where
        F: RightHandSide + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let times = linspace(tmin, tmax, tpart.max(1));
        let mut validator = StepValidator::new(self.validation);
        let mut states: Vec<DVector<f64>> = Vec::with_capacity(times.len());
        states.push(y0.clone());

        for n in 1..times.len() {
            let t = times[n];
            let dt = times[n] - times[n - 1];
            let next = self.step(f, t, dt, &states[n - 1]);
            validator.check(n, &next)?;
            states.push(next);
            observer.step_done();
        }
        debug!(
            "Backward Euler: {} steps, {} refinements per step",
            times.len() - 1,
            self.refinements
        );
        Trajectory::from_states(times, &states)
    }
}
