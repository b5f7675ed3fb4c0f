use crate::config::SimConfig;

/// Water relative permeability end point
pub const KRW_MAX: f64 = 0.2;
/// Corey exponent of the water curve
pub const KRW_EXPONENT: f64 = 4.2;
/// Gas relative permeability end point
pub const KRG_MAX: f64 = 0.94;
/// Corey exponent of the gas curve
pub const KRG_EXPONENT: f64 = 1.3;
/// Slope of the mobility reduction factor with respect to `nD`
pub const MRF_SLOPE: f64 = 18500.0;
/// Upper clip of the mobility reduction factor
pub const MRF_MAX: f64 = 1.0e6;

/// Relative permeability curves and foam strength for one rock/fluid system.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PermeabilityModel {
    /// connate water saturation
    pub Swc: f64,
    /// residual gas saturation
    pub Sgr: f64,
    /// foam onset water saturation
    pub Sw_star: f64,
    /// foam strength coefficient
    pub A: f64,
}

impl PermeabilityModel {
    #[allow(non_snake_case)]
    pub fn new(Swc: f64, Sgr: f64, Sw_star: f64, A: f64) -> Self {
        Self {
            Swc,
            Sgr,
            Sw_star,
            A,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.Swc, config.Sgr, config.Sw_star, config.A)
    }

    /// Mobile saturation window `1 - Swc - Sgr`
    fn mobile_window(&self) -> f64 {
        1.0 - self.Swc - self.Sgr
    }

    /// Foam indicator nD: 0 up to the onset saturation, `tanh(A (Sw - Sw*))` above it.
    #[allow(non_snake_case)]
    pub fn foam_indicator(&self, Sw: f64) -> f64 {
        if Sw > self.Sw_star {
            (self.A * (Sw - self.Sw_star)).tanh()
        } else {
            0.0
        }
    }

    /// krw = 0.2 Se^4.2, zero at and below connate saturation.
    ///
    /// The normalized saturation is clamped to be non-negative before the fractional
    /// power is taken. NaN passes through.
    #[allow(non_snake_case)]
    pub fn water_rel_perm(&self, Sw: f64) -> f64 {
        if Sw <= self.Swc {
            return 0.0;
        }
        let se = clamp_non_negative((Sw - self.Swc) / self.mobile_window());
        KRW_MAX * se.powf(KRW_EXPONENT)
    }

    /// Gas relative permeability without foam, zero at and above `1 - Sgr`.
    #[allow(non_snake_case)]
    pub fn gas_rel_perm_base(&self, Sw: f64) -> f64 {
        if Sw >= 1.0 - self.Sgr {
            return 0.0;
        }
        let sg = clamp_non_negative((1.0 - Sw - self.Sgr) / self.mobile_window());
        KRG_MAX * sg.powf(KRG_EXPONENT)
    }

    /// Gas relative permeability reduced by foam.
    #[allow(non_snake_case)]
    pub fn gas_rel_perm_with_foam(&self, Sw: f64, nD: f64) -> f64 {
        self.gas_rel_perm_base(Sw) / mobility_reduction_factor(nD)
    }

    /// nD for every cell of a layer
    pub fn foam_indicator_profile(&self, sw: &[f64]) -> Vec<f64> {
        sw.iter().map(|&s| self.foam_indicator(s)).collect()
    }
}

/// MRF = clip(18500 nD + 1, 1, 1e6)
#[allow(non_snake_case)]
pub fn mobility_reduction_factor(nD: f64) -> f64 {
    (MRF_SLOPE * nD + 1.0).clamp(1.0, MRF_MAX)
}

/// True when a saturation is NaN, infinite or outside `[-tolerance, 1 + tolerance]`.
#[allow(non_snake_case)]
pub fn is_out_of_range(Sw: f64, tolerance: f64) -> bool {
    !(Sw >= -tolerance && Sw <= 1.0 + tolerance)
}

fn clamp_non_negative(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}
