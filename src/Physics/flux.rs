use super::permeability::PermeabilityModel;
use crate::config::SimConfig;

/// Regularizer of the total mobility, keeps `fw` finite when both phases are immobile.
pub const MOBILITY_EPS: f64 = 1e-12;

/// Fractional flow of water built from the relative permeability curves and viscosities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxModel {
    pub permeability: PermeabilityModel,
    /// water viscosity
    pub mu_w: f64,
    /// gas viscosity without foam
    pub mu_g: f64,
}

impl FluxModel {
    pub fn new(permeability: PermeabilityModel, mu_w: f64, mu_g: f64) -> Self {
        Self {
            permeability,
            mu_w,
            mu_g,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            PermeabilityModel::from_config(config),
            config.mu_w,
            config.mu_g,
        )
    }

    /// fw = lw / (lw + lg + eps), with lw = k krw / mu_w and lg = k krg / mu_g
    #[allow(non_snake_case)]
    pub fn fractional_flow_water(&self, Sw: f64, nD: f64, k: f64) -> f64 {
        let lw = k * self.permeability.water_rel_perm(Sw) / self.mu_w;
        let lg = k * self.permeability.gas_rel_perm_with_foam(Sw, nD) / self.mu_g;
        lw / (lw + lg + MOBILITY_EPS)
    }

    /// fw of every cell of a layer with permeability `k`, foam indicator computed on the fly.
    pub fn fractional_flow_profile(&self, sw: &[f64], k: f64) -> Vec<f64> {
        sw.iter()
            .map(|&s| self.fractional_flow_water(s, self.permeability.foam_indicator(s), k))
            .collect()
    }
}
