//! # Physics Module
//!
//! Closure laws of the two-phase (water-gas) foam model.
//!
//! | Symbol | Description |
//! |--------|-------------|
//! | `Sw` | water saturation |
//! | `nD` | dimensionless foam texture, `tanh(A (Sw - Sw*))` above the onset saturation |
//! | `krw` | water relative permeability, `0.2 Se^4.2` |
//! | `krg0` | gas relative permeability without foam, `0.94 ((1 - Sw - Sgr)/(1 - Swc - Sgr))^1.3` |
//! | `MRF` | mobility reduction factor, `clip(18500 nD + 1, 1, 1e6)` |
//! | `krg` | gas relative permeability with foam, `krg0 / MRF` |
//! | `fw` | fractional flow of water, `lw / (lw + lg + 1e-12)` |
//!
//! Every function here is pure and works on a single saturation value; the `*_profile`
//! variants map the same law over a whole layer.

/// relative permeabilities and foam strength
pub mod permeability;
/// fractional flow of water for one layer
pub mod flux;
