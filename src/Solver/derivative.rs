use crate::Physics::flux::FluxModel;
use crate::config::SimConfig;
use crate::grid::Grid;
use nalgebra::DVector;

/// Right-hand side `f(t, y)` of a system `dy/dt = f(t, y)`.
pub trait RightHandSide {
    fn eval(&self, t: f64, y: &DVector<f64>) -> DVector<f64>;
}

impl<F> RightHandSide for F
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    fn eval(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        self(t, y)
    }
}

/// Time derivative of the stacked saturation state `[Sw1 (Nx), Sw2 (Nx)]`.
///
/// Interior cells combine upwind advection of the fractional flow, the interlayer
/// exchange `θ (Sw1 - Sw2)` (removed from layer 1, added to layer 2) and numerical
/// diffusion, all divided by porosity. Cells `0` and `Nx - 1` of both layers get a zero
/// derivative, which keeps their initial values (injection saturation at the inlet).
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeEvaluator {
    pub flux: FluxModel,
    pub Nx: usize,
    pub dx: f64,
    pub diff_coef: f64,
    pub u1: f64,
    pub u2: f64,
    pub k1: f64,
    pub k2: f64,
    pub theta_s: f64,
    pub phi: f64,
}

impl DerivativeEvaluator {
    pub fn new(config: &SimConfig, grid: &Grid) -> Self {
        Self {
            flux: FluxModel::from_config(config),
            Nx: grid.Nx,
            dx: grid.dx,
            diff_coef: grid.diffusion_coefficient(config.diff_scale),
            u1: config.u1,
            u2: config.u2,
            k1: config.k1,
            k2: config.k2,
            theta_s: config.theta_s,
            phi: config.phi,
        }
    }

    /// Length of the state vector this evaluator accepts.
    pub fn state_len(&self) -> usize {
        2 * self.Nx
    }

    /// # Panics
    /// If `state` is not `2 * Nx` long.
    pub fn evaluate(&self, state: &DVector<f64>) -> DVector<f64> {
        let nx = self.Nx;
        assert_eq!(
            state.len(),
            self.state_len(),
            "saturation state must hold two layers of {} cells",
            nx
        );
        let (sw1, sw2) = state.as_slice().split_at(nx);
        let fw1 = self.flux.fractional_flow_profile(sw1, self.k1);
        let fw2 = self.flux.fractional_flow_profile(sw2, self.k2);

        let dx = self.dx;
        let dx2 = dx * dx;
        let mut d_state = DVector::zeros(2 * nx);
        for i in 1..nx - 1 {
            let exchange = self.theta_s * (sw1[i] - sw2[i]);

            d_state[i] = (-self.u1 * (fw1[i] - fw1[i - 1]) / dx - exchange
                + self.diff_coef * (sw1[i + 1] - 2.0 * sw1[i] + sw1[i - 1]) / dx2)
                / self.phi;

            d_state[nx + i] = (-self.u2 * (fw2[i] - fw2[i - 1]) / dx
                + exchange
                + self.diff_coef * (sw2[i + 1] - 2.0 * sw2[i] + sw2[i - 1]) / dx2)
                / self.phi;
        }
        d_state
    }
}

impl RightHandSide for DerivativeEvaluator {
    /// The system is autonomous, `t` is ignored.
    fn eval(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> {
        self.evaluate(y)
    }
}
